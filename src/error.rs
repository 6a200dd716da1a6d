// src/error.rs

use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling for the data-service client, the
/// normalization seam and the UI-facing operations.
#[derive(Debug)]
pub enum AppError {
    // Transport or remote-service failure (timeouts, non-2xx statuses).
    // The only retryable class: the UI shows a retry affordance for it.
    ServiceError(String),

    // Malformed rows from the data service (bad timestamps, unknown
    // status strings, failed validation at the normalization seam).
    BadData(String),

    // Entity missing or not visible to the current session.
    NotFound(String),

    // Broken local configuration (bad service URL, missing keys).
    ConfigError(String),
}

impl AppError {
    /// Whether the operation that produced this error is worth
    /// retrying as-is. Bad data stays bad on retry; transport may not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::ServiceError(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts `reqwest::Error` into `AppError::ServiceError`.
/// Allows using `?` operator on data-service calls.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ServiceError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadData(err.to_string())
    }
}

/// Timestamps from the service are ISO-8601 strings; a failed parse is
/// surfaced to the caller instead of being coerced (fail fast).
impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::BadData(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}
