use crate::core::class::PresenterClass;
use crate::core::registry::PresenterRegistry;
use crate::domain::model::ExposeOptions;
use crate::utils::error::{PresenterError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenterConfig {
    pub presenters: Vec<PresenterDefinition>,
    pub helpers: Option<HelpersConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenterDefinition {
    pub name: String,
    pub extends: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub expose: Option<Vec<ExposeDefinition>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposeDefinition {
    pub attributes: Vec<String>,
    pub with: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpersConfig {
    pub default_url_options: Option<Map<String, Value>>,
}

impl PresenterConfig {
    /// Loads presenter declarations from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PresenterError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses presenter declarations from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PresenterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value, leaving unset ones as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PresenterError::ConfigError {
            message: format!("env pattern failed to compile: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn get_presenter(&self, name: &str) -> Option<&PresenterDefinition> {
        self.presenters.iter().find(|p| p.name == name)
    }

    pub fn default_url_options(&self) -> Option<&Map<String, Value>> {
        self.helpers.as_ref()?.default_url_options.as_ref()
    }

    /// Checks names, roles and `extends` ordering.
    pub fn validate_config(&self) -> Result<()> {
        let mut defined = HashSet::new();

        for (index, presenter) in self.presenters.iter().enumerate() {
            let field = format!("presenters[{}]", index);
            validation::validate_identifier(&format!("{}.name", field), &presenter.name)?;

            if !defined.insert(presenter.name.as_str()) {
                return Err(PresenterError::InvalidConfigValueError {
                    field: format!("{}.name", field),
                    value: presenter.name.clone(),
                    reason: "Presenter is defined more than once".to_string(),
                });
            }

            // parents must be declared before their children
            if let Some(parent) = &presenter.extends {
                if parent == &presenter.name || !defined.contains(parent.as_str()) {
                    return Err(PresenterError::InvalidConfigValueError {
                        field: format!("{}.extends", field),
                        value: parent.clone(),
                        reason: "Must name a presenter defined earlier in the file".to_string(),
                    });
                }
            }

            if let Some(subjects) = &presenter.subjects {
                validation::validate_identifiers(&format!("{}.subjects", field), subjects)?;
                validation::validate_unique_names(&format!("{}.subjects", field), subjects)?;
            }

            for (expose_index, expose) in presenter.expose.iter().flatten().enumerate() {
                let expose_field = format!("{}.expose[{}]", field, expose_index);
                validation::validate_non_empty_list(
                    &format!("{}.attributes", expose_field),
                    &expose.attributes,
                )?;
                validation::validate_identifiers(
                    &format!("{}.attributes", expose_field),
                    &expose.attributes,
                )?;
                if let Some(role) = &expose.with {
                    validation::validate_identifier(&format!("{}.with", expose_field), role)?;
                }
            }
        }

        Ok(())
    }

    /// Builds every presenter in declaration order.
    pub fn build_registry(&self) -> Result<PresenterRegistry> {
        self.validate_config()?;

        let mut registry = PresenterRegistry::new();
        for definition in &self.presenters {
            let mut class = match &definition.extends {
                Some(parent) => registry.fetch(parent)?.subclass(definition.name.as_str()),
                None => PresenterClass::new(definition.name.as_str()),
            };

            if let Some(subjects) = &definition.subjects {
                class.subjects(subjects.as_slice());
            }

            for expose in definition.expose.iter().flatten() {
                let options = ExposeOptions {
                    with: expose.with.clone(),
                };
                class.expose(expose.attributes.as_slice(), options);
            }

            if class.parent().is_none() {
                if let Some(options) = self.default_url_options() {
                    class.set_default_url_options(options.clone());
                }
            }

            tracing::debug!(
                "Built presenter {} ({} attributes)",
                class.name(),
                class.attributes().len()
            );
            registry.register(class);
        }

        Ok(registry)
    }
}

impl Validate for PresenterConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const COMMENT_CONFIG: &str = r#"
[[presenters]]
name = "CommentPresenter"
subjects = ["comment", "post"]
expose = [
  { attributes = ["body"] },
  { attributes = ["name"], with = "user" },
  { attributes = ["title"], with = "post" },
]

[[presenters]]
name = "AdminCommentPresenter"
extends = "CommentPresenter"
expose = [{ attributes = ["email"], with = "user" }]
"#;

    #[test]
    fn test_parse_presenter_config() {
        let config = PresenterConfig::from_toml_str(COMMENT_CONFIG).unwrap();

        assert_eq!(config.presenters.len(), 2);
        let comment = config.get_presenter("CommentPresenter").unwrap();
        assert_eq!(comment.subjects.as_ref().unwrap(), &vec!["comment", "post"]);
        assert_eq!(comment.expose.as_ref().unwrap()[1].with.as_deref(), Some("user"));
        assert!(config.helpers.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_build_registry_applies_inheritance() {
        let registry = PresenterConfig::from_toml_str(COMMENT_CONFIG)
            .unwrap()
            .build_registry()
            .unwrap();

        let parent = registry.fetch("CommentPresenter").unwrap();
        let child = registry.fetch("AdminCommentPresenter").unwrap();

        assert_eq!(parent.attributes().len(), 3);
        assert_eq!(child.attributes().len(), 4);
        assert_eq!(child.parent(), Some("CommentPresenter"));
        assert_eq!(child.subject_roles(), parent.subject_roles());
        assert!(!parent.attributes().contains_key("user_email"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SIMPLE_PRESENTER_TEST_HOST", "test.example.com");

        let toml_content = r#"
[[presenters]]
name = "UserPresenter"
expose = [{ attributes = ["name", "email"] }]

[helpers.default_url_options]
host = "${SIMPLE_PRESENTER_TEST_HOST}"
"#;

        let config = PresenterConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.default_url_options().unwrap()["host"],
            Value::String("test.example.com".to_string())
        );

        let registry = config.build_registry().unwrap();
        let users = registry.fetch("UserPresenter").unwrap();
        assert!(users.default_url_options().is_some());

        std::env::remove_var("SIMPLE_PRESENTER_TEST_HOST");
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let toml_content = r#"
[[presenters]]
name = "ChildPresenter"
extends = "MissingPresenter"
"#;

        let config = PresenterConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
        assert!(config.build_registry().is_err());
    }

    #[test]
    fn test_invalid_identifiers_are_rejected() {
        let toml_content = r#"
[[presenters]]
name = "CommentPresenter"
subjects = ["comment", "comment"]
"#;
        let config = PresenterConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[[presenters]]
name = "CommentPresenter"
expose = [{ attributes = ["user.name"] }]
"#;
        let config = PresenterConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[[presenters]]
name = "CommentPresenter"
expose = [{ attributes = [] }]
"#;
        let config = PresenterConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_subjects_keep_inherited_roles() {
        let toml_content = r#"
[[presenters]]
name = "CommentPresenter"
subjects = ["comment", "post"]

[[presenters]]
name = "ReplyPresenter"
extends = "CommentPresenter"
subjects = []
expose = [{ attributes = ["body"] }]

[[presenters]]
name = "UserPresenter"
subjects = []
"#;

        let config = PresenterConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let registry = config.build_registry().unwrap();
        let reply = registry.fetch("ReplyPresenter").unwrap();
        assert_eq!(reply.subject_roles(), ["comment".to_string(), "post".to_string()]);
        assert_eq!(reply.default_role(), "comment");

        let users = registry.fetch("UserPresenter").unwrap();
        assert_eq!(users.subject_roles(), ["subject".to_string()]);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(COMMENT_CONFIG.as_bytes()).unwrap();

        let config = PresenterConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.presenters[0].name, "CommentPresenter");
    }
}
