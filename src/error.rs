// Client-side error types for backend calls and form validation
use serde_json::Value;
use thiserror::Error;

/// Fallback message when a failed response carries neither `message` nor `error`
pub const GENERIC_API_ERROR: &str = "API request failed";

/// Error raised by the gateway for any backend call that did not succeed
#[derive(Debug, Error)]
pub enum ApiError {
    // Non-2xx response; message is taken from the response body
    #[error("{message}")]
    Status { status: u16, message: String },

    // Network-level failure, propagated as-is
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    // 2xx response whose body is not JSON
    #[error("Invalid response body: {0}")]
    InvalidResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Build a status error from a failed response body
    pub fn from_response(status: u16, body: &Value) -> Self {
        let message = ["message", "error"]
            .iter()
            .filter_map(|key| body.get(*key).and_then(Value::as_str))
            .find(|msg| !msg.is_empty())
            .unwrap_or(GENERIC_API_ERROR)
            .to_string();

        ApiError::Status { status, message }
    }

    /// HTTP status code, when the backend answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message suitable for a one-line error banner
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    /// Error code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Status { status, .. } => match status {
                400 => "BAD_REQUEST",
                401 => "UNAUTHORIZED",
                403 => "FORBIDDEN",
                404 => "NOT_FOUND",
                409 => "CONFLICT",
                422 => "UNPROCESSABLE_ENTITY",
                429 => "TOO_MANY_REQUESTS",
                500..=599 => "SERVER_ERROR",
                _ => "API_ERROR",
            },
            ApiError::Transport(_) => "TRANSPORT_ERROR",
            ApiError::InvalidResponse(_) => "INVALID_RESPONSE",
            ApiError::InvalidUrl(_) => "INVALID_URL",
        }
    }
}

/// A form field that failed local validation; no request was sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Reading or writing the persisted session file
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_field_wins_over_error_field() {
        let err = ApiError::from_response(404, &json!({"message": "Not found", "error": "nope"}));
        assert_eq!(err.to_string(), "Not found");
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn error_field_used_when_message_missing() {
        let err = ApiError::from_response(400, &json!({"error": "Invalid page"}));
        assert_eq!(err.message(), "Invalid page");
    }

    #[test]
    fn generic_message_when_body_has_neither() {
        let err = ApiError::from_response(500, &json!({}));
        assert_eq!(err.message(), GENERIC_API_ERROR);

        let err = ApiError::from_response(502, &Value::Null);
        assert_eq!(err.message(), GENERIC_API_ERROR);
        assert_eq!(err.error_code(), "SERVER_ERROR");
    }

    #[test]
    fn empty_message_falls_through() {
        let err = ApiError::from_response(401, &json!({"message": "", "error": "Token expired"}));
        assert_eq!(err.message(), "Token expired");
        assert!(err.is_unauthorized());
    }
}
