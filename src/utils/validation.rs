use crate::utils::error::{PresenterError, Result};
use regex::Regex;
use std::collections::HashSet;

const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn identifier_regex() -> Result<Regex> {
    Regex::new(IDENTIFIER_PATTERN).map_err(|e| PresenterError::ConfigError {
        message: format!("identifier pattern failed to compile: {}", e),
    })
}

/// Role, attribute and presenter names must be plain identifiers so the
/// computed `role_attribute` names stay unambiguous.
pub fn validate_identifier(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PresenterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Identifier cannot be empty".to_string(),
        });
    }

    if !identifier_regex()?.is_match(value) {
        return Err(PresenterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Must start with a letter or underscore and contain only letters, digits and underscores"
                .to_string(),
        });
    }

    Ok(())
}

pub fn validate_identifiers(field_name: &str, values: &[String]) -> Result<()> {
    for (index, value) in values.iter().enumerate() {
        validate_identifier(&format!("{}[{}]", field_name, index), value)?;
    }
    Ok(())
}

pub fn validate_unique_names(field_name: &str, values: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value.as_str()) {
            return Err(PresenterError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: "Duplicate name".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(PresenterError::ConfigValidationError {
            field: field_name.to_string(),
            message: "List cannot be empty".to_string(),
        });
    }
    Ok(())
}
