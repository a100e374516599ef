//! Client error types

use shared::error::{ApiErrorBody, ErrorCategory};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Token missing, invalid or expired (401)
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Role does not allow the action (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected by validation (400/422)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Token storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Operation not allowed in the current client state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl ClientError {
    /// Map a non-success response to an error
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = ApiErrorBody::parse(body)
            .message()
            .map(str::to_string)
            .unwrap_or_default();
        match ErrorCategory::from_status(status) {
            ErrorCategory::Unauthorized => Self::Unauthorized(message),
            ErrorCategory::Forbidden => Self::Forbidden(message),
            ErrorCategory::NotFound => Self::NotFound(message),
            ErrorCategory::Validation => Self::Validation(message),
            _ => Self::Server { status, message },
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(e) => {
                if e.is_connect()
                    || e.is_timeout()
                    || ErrorCategory::is_network_message(&e.to_string())
                {
                    ErrorCategory::Network
                } else {
                    ErrorCategory::Server
                }
            }
            Self::Unauthorized(_) => ErrorCategory::Unauthorized,
            Self::Forbidden(_) => ErrorCategory::Forbidden,
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Server { .. }
            | Self::InvalidResponse(_)
            | Self::Serialization(_)
            | Self::Storage(_)
            | Self::InvalidState(_) => ErrorCategory::Server,
        }
    }

    /// Session expired, the operator has to log in again
    pub fn is_session_expired(&self) -> bool {
        self.category().is_session_expired()
    }

    /// Banner text for this error
    ///
    /// The server message wins where the backend sends one; otherwise the
    /// category hint is used.
    pub fn user_message(&self) -> String {
        let category = self.category();
        match self {
            Self::Unauthorized(message)
            | Self::NotFound(message)
            | Self::Validation(message)
                if !message.is_empty() =>
            {
                message.clone()
            }
            Self::Server { message, .. } if !message.is_empty() => message.clone(),
            Self::Server { status, .. } => format!("Request failed (HTTP {})", status),
            Self::InvalidResponse(detail) => format!("Unexpected server response: {}", detail),
            Self::Serialization(e) => format!("Unexpected server response: {}", e),
            Self::Storage(e) => format!("Could not access local storage: {}", e),
            Self::InvalidState(message) => message.clone(),
            _ => category.hint().to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_categories() {
        let err = ClientError::from_response(401, "");
        assert_eq!(err.category(), ErrorCategory::Unauthorized);
        assert!(err.is_session_expired());

        let err = ClientError::from_response(403, "");
        assert_eq!(err.category(), ErrorCategory::Forbidden);
        assert!(!err.is_session_expired());

        let err = ClientError::from_response(400, r#"{"message":"orgId is required"}"#);
        assert!(matches!(err, ClientError::Validation(ref m) if m == "orgId is required"));

        let err = ClientError::from_response(409, r#"{"message":"MAC already registered"}"#);
        assert!(matches!(err, ClientError::Server { status: 409, .. }));
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ClientError::from_response(400, r#"{"message":"amount must be positive"}"#);
        assert_eq!(err.user_message(), "amount must be positive");

        let err = ClientError::from_response(500, r#"{"message":"Kiosk has no MAC ID"}"#);
        assert_eq!(err.user_message(), "Kiosk has no MAC ID");
    }

    #[test]
    fn test_user_message_fallbacks() {
        let err = ClientError::from_response(503, "");
        assert_eq!(err.user_message(), "Request failed (HTTP 503)");

        let err = ClientError::from_response(403, r#"{"message":"denied"}"#);
        assert_eq!(err.user_message(), ErrorCategory::Forbidden.hint());

        let err = ClientError::from_response(401, "");
        assert_eq!(err.user_message(), ErrorCategory::Unauthorized.hint());
    }
}
