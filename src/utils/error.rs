use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresenterError {
    #[error("Undefined exposed attribute `{name}` for {presenter}")]
    UnknownAttribute { presenter: String, name: String },

    #[error("Unknown presenter: {name}")]
    UnknownPresenter { name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for `{field}`: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value `{value}` for `{field}`: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Definition,
    Configuration,
    Io,
}

impl PresenterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PresenterError::UnknownAttribute { .. } | PresenterError::UnknownPresenter { .. } => {
                ErrorCategory::Definition
            }
            PresenterError::ConfigError { .. }
            | PresenterError::ConfigValidationError { .. }
            | PresenterError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PresenterError::IoError(_)
            | PresenterError::SerializationError(_)
            | PresenterError::CsvError(_) => ErrorCategory::Io,
        }
    }

    /// Process exit status used by the command-line tool.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Definition => 2,
            ErrorCategory::Io => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Definition => format!("Presenter definition problem: {}", self),
            ErrorCategory::Configuration => format!("Check your presenter configuration: {}", self),
            ErrorCategory::Io => format!("Could not read or write data: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PresenterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let err = PresenterError::UnknownAttribute {
            presenter: "UserPresenter".to_string(),
            name: "password_hash".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Definition);
        assert!(err.to_string().contains("password_hash"));

        let err = PresenterError::InvalidConfigValueError {
            field: "presenters[0].name".to_string(),
            value: "1abc".to_string(),
            reason: "not an identifier".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.user_friendly_message().starts_with("Check your presenter configuration"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_unknown_presenter_is_reported_as_definition_problem() {
        let err = PresenterError::UnknownPresenter {
            name: "PostPresenter".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Definition);
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            err.user_friendly_message(),
            "Presenter definition problem: Unknown presenter: PostPresenter"
        );

        let err = PresenterError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json"));
        assert_eq!(err.exit_code(), 3);
    }
}
