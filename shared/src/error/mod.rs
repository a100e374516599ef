//! Error taxonomy shared by the wash network clients
//!
//! The backend answers failures with a plain `{"message": "..."}` body and an
//! HTTP status. Clients classify every failure into an [`ErrorCategory`] so
//! screens can render the right banner:
//!
//! - 401: session expired, prompt re-login
//! - 403: insufficient role, access-denied banner with a re-login hint
//! - 400/422: validation, keep the form open
//! - 404: record gone (usually archived by someone else)
//! - other 4xx/5xx: server-provided message or a generic fallback
//! - network: backend unreachable, point at the deployment
//!
//! # Example
//!
//! ```
//! use shared::error::ErrorCategory;
//!
//! let category = ErrorCategory::from_status(403);
//! assert_eq!(category, ErrorCategory::Forbidden);
//! assert!(ErrorCategory::is_network_message("Network Error"));
//! ```

mod category;

pub use category::ErrorCategory;

use serde::{Deserialize, Serialize};

/// Error body returned by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Parse a raw response body; non-JSON bodies become the message verbatim
    pub fn parse(body: &str) -> Self {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        serde_json::from_str::<Self>(trimmed).unwrap_or_else(|_| Self {
            message: Some(trimmed.to_string()),
        })
    }

    /// Server message, ignoring blank strings
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}
