use thiserror::Error;

#[derive(Error, Debug)]
pub enum VenueError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[cfg(feature = "cli")]
    #[error("CSV rendering error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl VenueError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VenueError::ApiError(_) => ErrorCategory::Network,
            VenueError::ConfigValidationError { .. }
            | VenueError::InvalidConfigValueError { .. }
            | VenueError::MissingConfigError { .. } => ErrorCategory::Configuration,
            VenueError::SerializationError(_) | VenueError::ValidationError { .. } => {
                ErrorCategory::Data
            }
            #[cfg(feature = "cli")]
            VenueError::CsvError(_) => ErrorCategory::Data,
            VenueError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 伺服器端 5xx 或網路中斷通常可以稍後重試
            VenueError::ApiError(e) => match e.status() {
                Some(status) if status.is_client_error() => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            VenueError::ConfigValidationError { .. }
            | VenueError::InvalidConfigValueError { .. }
            | VenueError::MissingConfigError { .. }
            | VenueError::ValidationError { .. } => ErrorSeverity::High,
            VenueError::SerializationError(_) => ErrorSeverity::High,
            #[cfg(feature = "cli")]
            VenueError::CsvError(_) => ErrorSeverity::High,
            VenueError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 程序結束碼；任何錯誤都不會回傳 0
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// HTTP 狀態碼（僅限伺服器有回應的 API 錯誤）
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            VenueError::ApiError(e) => e.status(),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            VenueError::ApiError(e) => match e.status() {
                Some(status) if status == reqwest::StatusCode::NOT_FOUND => {
                    "The venue could not be found".to_string()
                }
                Some(status) => format!("The venue service responded with {}", status),
                None if e.is_decode() => {
                    "The venue service returned an unexpected response".to_string()
                }
                None => "Could not reach the venue service".to_string(),
            },
            VenueError::ConfigValidationError { field, .. }
            | VenueError::InvalidConfigValueError { field, .. } => {
                format!("Configuration value '{}' is invalid", field)
            }
            VenueError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            VenueError::ValidationError { message } => message.clone(),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => match self.severity() {
                ErrorSeverity::Medium => "Check the network connection and try again later",
                _ => "Check the venue id and the request parameters",
            },
            ErrorCategory::Configuration => {
                "Check --api-base-url, --header and the [api] section of the config file"
            }
            ErrorCategory::Data => "Check the input values and the requested output format",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, VenueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = VenueError::MissingConfigError {
            field: "api.base_url".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.status().is_none());
        assert!(err.user_friendly_message().contains("api.base_url"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = VenueError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_every_failure_has_a_non_zero_exit_code() {
        let errors = [
            VenueError::MissingConfigError {
                field: "api.base_url".to_string(),
            },
            VenueError::ValidationError {
                message: "bad".to_string(),
            },
            VenueError::IoError(std::io::Error::new(std::io::ErrorKind::Other, "io")),
            VenueError::SerializationError(
                serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
            ),
        ];

        for err in &errors {
            assert_ne!(err.exit_code(), 0, "{} exited with 0", err);
        }
        assert_eq!(errors[0].exit_code(), 1);
        assert_eq!(errors[2].exit_code(), 3);
    }

    #[test]
    fn test_validation_message_is_passed_through() {
        let err = VenueError::ValidationError {
            message: "rating out of range".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "rating out of range");
        assert_eq!(err.category(), ErrorCategory::Data);
    }
}
