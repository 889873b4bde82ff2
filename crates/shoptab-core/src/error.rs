use thiserror::Error;

/// Application-wide error types for shoptab.
#[derive(Error, Debug)]
pub enum AppError {
    /// Network/connection error (DNS, TLS, refused connection).
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Upstream rejected the credentials (HTTP 401/403).
    #[error("Authentication failed (HTTP {status_code}): {message}")]
    AuthError { status_code: u16, message: String },

    /// HTTP request failed with a non-success status.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Response body is not JSON or lacks the expected `results` envelope.
    #[error("Response format error: {0}")]
    ResponseFormatError(String),

    /// An expected field is absent from the response content.
    #[error("Missing field `{key}`{}", .index.map_or(String::new(), |i| format!(" in item {i}")))]
    MissingFieldError { key: String, index: Option<usize> },

    /// Writing an output file failed.
    #[error("Failed to write {path}: {message}")]
    FileWriteError { path: String, message: String },

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_key_and_index() {
        let err = AppError::MissingFieldError {
            key: "merchant.name".into(),
            index: Some(3),
        };
        assert_eq!(err.to_string(), "Missing field `merchant.name` in item 3");
    }

    #[test]
    fn missing_field_without_index() {
        let err = AppError::MissingFieldError {
            key: "reviews".into(),
            index: None,
        };
        assert_eq!(err.to_string(), "Missing field `reviews`");
    }

    #[test]
    fn auth_error_carries_status() {
        let err = AppError::AuthError {
            status_code: 401,
            message: "unauthorized".into(),
        };
        assert!(err.to_string().contains("401"));
    }
}
