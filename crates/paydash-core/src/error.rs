//! Error types for paydash-core
//!
//! Errors carry a stable code and a severity, and can be expanded into
//! `ErrorDetails` for API responses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Query parameter outside its allowed domain
    InvalidParameter,
    /// Route or resource not found
    NotFound,
    /// Configuration error
    ConfigError,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::InvalidParameter => write!(f, "INVALID_PARAMETER"),
            ErrorCode::NotFound => write!(f, "NOT_FOUND"),
            ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Debug => write!(f, "debug"),
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for paydash-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid value for '{name}': {value:?}")]
    InvalidParameter {
        name: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Build an `InvalidParameter` error from the allowed wire names
    pub fn invalid_parameter<I, S>(name: &str, value: &str, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CoreError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            CoreError::ConfigError { .. } => ErrorCode::ConfigError,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::InvalidParameter { .. } => ErrorSeverity::Info,
            CoreError::ConfigError { .. } => ErrorSeverity::Critical,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::InvalidParameter { name, allowed, .. } => {
                details = details.with_detail(serde_json::json!({
                    "parameter": name,
                    "allowed": allowed,
                }));
                details = details.with_suggestion(format!(
                    "Use one of: {}.",
                    allowed.join(", ")
                ));
                details = details.with_suggestion(format!(
                    "Omit '{}' or leave it empty to skip it.",
                    name
                ));
            }
            CoreError::ConfigError { message } => {
                details = details.with_suggestion(message.clone());
            }
            CoreError::InternalError { .. } => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::InvalidParameter.to_string(), "INVALID_PARAMETER");
        assert_eq!(ErrorCode::ConfigError.to_string(), "CONFIG_ERROR");
        assert_eq!(
            serde_json::to_value(ErrorCode::InternalError).unwrap(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_core_error_severity() {
        let error = CoreError::invalid_parameter("status", "done", ["success", "failed"]);
        assert_eq!(error.severity(), ErrorSeverity::Info);

        let error = CoreError::ConfigError { message: "bad".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert_eq!(ErrorSeverity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_error_details_invalid_parameter() {
        let error = CoreError::invalid_parameter("method", "cash", ["card", "upi"]);
        let details = error.to_details();

        assert_eq!(details.code, ErrorCode::InvalidParameter);
        assert!(details.message.contains("method"));
        assert!(details.message.contains("cash"));
        assert_eq!(details.details.as_ref().unwrap()["allowed"][1], "upi");
        assert_eq!(details.suggestions.len(), 2);
        assert!(details.suggestions[0].contains("card, upi"));
    }

    #[test]
    fn test_error_details_display() {
        let details = ErrorDetails::new(ErrorCode::InternalError, "boom".to_string())
            .with_suggestion("Retry".to_string());
        let text = details.to_string();
        assert!(text.starts_with("[INTERNAL_ERROR] boom"));
        assert!(text.contains("  - Retry"));
    }
}
