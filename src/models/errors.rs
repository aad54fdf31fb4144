use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Rate limit exceeded: {message}")]
    RateLimitError {
        message: String,
        retry_after_seconds: u64,
    },

    #[error("Session error: {message}")]
    SessionError { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error_code: String,
    pub severity: ErrorSeverity,
    pub actions: Vec<ErrorAction>,
    pub retry_after: Option<u64>, // seconds
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorAction {
    pub action_type: ErrorActionType,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ErrorActionType {
    Retry,
    EditInput,
    SignIn,
    ContactSupport,
}

pub struct ErrorHandler;

impl ErrorHandler {
    /// Converts an AppError into the message a visitor or admin sees
    pub fn handle_error(error: AppError) -> ErrorResponse {
        match error {
            AppError::ValidationError { message } => ErrorResponse {
                message: "Please check the highlighted fields".to_string(),
                error_code: "VALIDATION_FAILED".to_string(),
                severity: ErrorSeverity::Low,
                actions: vec![ErrorAction {
                    action_type: ErrorActionType::EditInput,
                    label: "Fix Input".to_string(),
                    description: "Correct the input and submit again".to_string(),
                }],
                retry_after: None,
                details: Some(message),
            },

            AppError::StorageError { message } => ErrorResponse {
                message: "Could not save your changes".to_string(),
                error_code: "STORAGE_FAILED".to_string(),
                severity: ErrorSeverity::High,
                actions: vec![
                    ErrorAction {
                        action_type: ErrorActionType::Retry,
                        label: "Try Again".to_string(),
                        description: "Retry the operation".to_string(),
                    },
                    ErrorAction {
                        action_type: ErrorActionType::ContactSupport,
                        label: "Contact Us".to_string(),
                        description: "If the problem persists, reach us by phone or WhatsApp"
                            .to_string(),
                    },
                ],
                retry_after: Some(5),
                details: Some(message),
            },

            AppError::RateLimitError {
                message,
                retry_after_seconds,
            } => ErrorResponse {
                message: "Too many attempts, please try again later".to_string(),
                error_code: "RATE_LIMITED".to_string(),
                severity: ErrorSeverity::Medium,
                actions: vec![ErrorAction {
                    action_type: ErrorActionType::Retry,
                    label: "Wait and Retry".to_string(),
                    description: format!("Try again in {} seconds", retry_after_seconds),
                }],
                retry_after: Some(retry_after_seconds),
                details: Some(message),
            },

            AppError::SessionError { message } => ErrorResponse {
                message: "Your session is not valid".to_string(),
                error_code: "SESSION_ERROR".to_string(),
                severity: ErrorSeverity::Medium,
                actions: vec![ErrorAction {
                    action_type: ErrorActionType::SignIn,
                    label: "Sign In".to_string(),
                    description: "Sign in to the admin portal again".to_string(),
                }],
                retry_after: None,
                details: Some(message),
            },
        }
    }

    /// Determines if an error is worth retrying without changing the input
    pub fn is_retryable(error: &AppError) -> bool {
        matches!(error, AppError::StorageError { .. })
    }

    /// Gets the recommended retry delay for an error
    pub fn get_retry_delay(error: &AppError) -> Duration {
        match error {
            AppError::StorageError { .. } => Duration::from_secs(5),
            AppError::RateLimitError {
                retry_after_seconds,
                ..
            } => Duration::from_secs(*retry_after_seconds),
            _ => Duration::from_secs(1),
        }
    }
}

// Convenience functions for creating specific errors
impl AppError {
    pub fn validation_failed(message: impl Into<String>) -> Self {
        AppError::ValidationError {
            message: message.into(),
        }
    }

    pub fn storage_failed(message: impl Into<String>) -> Self {
        AppError::StorageError {
            message: message.into(),
        }
    }

    pub fn rate_limited(message: impl Into<String>, retry_after_seconds: u64) -> Self {
        AppError::RateLimitError {
            message: message.into(),
            retry_after_seconds,
        }
    }

    pub fn session_error(message: impl Into<String>) -> Self {
        AppError::SessionError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_not_retryable() {
        let error = AppError::validation_failed("Title cannot be empty");
        assert!(!ErrorHandler::is_retryable(&error));

        let response = ErrorHandler::handle_error(error);
        assert_eq!(response.error_code, "VALIDATION_FAILED");
        assert_eq!(response.retry_after, None);
        assert_eq!(response.details.as_deref(), Some("Title cannot be empty"));
    }

    #[test]
    fn test_rate_limit_response_carries_retry_hint() {
        let error = AppError::rate_limited("3 attempts per 60 seconds", 42);
        assert_eq!(ErrorHandler::get_retry_delay(&error), Duration::from_secs(42));

        let response = ErrorHandler::handle_error(error);
        assert_eq!(response.error_code, "RATE_LIMITED");
        assert_eq!(response.retry_after, Some(42));
        assert_eq!(response.actions[0].action_type, ErrorActionType::Retry);
    }

    #[test]
    fn test_storage_error_is_retryable() {
        let error = AppError::storage_failed("disk full");
        assert!(ErrorHandler::is_retryable(&error));
        assert_eq!(ErrorHandler::handle_error(error).severity, ErrorSeverity::High);
    }

    #[test]
    fn test_error_display() {
        let error = AppError::session_error("Admin session not found");
        assert_eq!(error.to_string(), "Session error: Admin session not found");
    }
}
