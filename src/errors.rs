use thiserror::Error;

/// Failures of a single relay round trip to the completion service
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP error: {status} - {message}")]
    HttpError {
        status: u16,
        message: String,
    },

    #[error("Failed to parse model reply: {0}")]
    ParseError(String),

    #[error("Model reply field '{field}' is invalid: {reason}")]
    SchemaError {
        field: String,
        reason: String,
    },

    #[error("Template error: {0}")]
    TemplateError(String),
}

impl RelayError {
    pub fn schema(field: &str, reason: impl Into<String>) -> Self {
        RelayError::SchemaError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
