//! Error category classification

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Substrings that identify a transport-level failure in an error message
const NETWORK_MARKERS: &[&str] = &[
    "Network",
    "ERR_",
    "Failed to fetch",
    "Connection refused",
    "connection refused",
    "error sending request",
];

/// Error category classification based on HTTP status or transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// 401, token missing, invalid or expired
    Unauthorized,
    /// 403, role does not allow the action
    Forbidden,
    /// 400 / 422
    Validation,
    /// 404
    NotFound,
    /// Any other non-success status
    Server,
    /// The request never got an HTTP answer
    Network,
}

impl ErrorCategory {
    /// Determine category from an HTTP status code
    pub fn from_status(status: u16) -> Self {
        match StatusCode::from_u16(status) {
            Ok(StatusCode::UNAUTHORIZED) => Self::Unauthorized,
            Ok(StatusCode::FORBIDDEN) => Self::Forbidden,
            Ok(StatusCode::NOT_FOUND) => Self::NotFound,
            Ok(StatusCode::BAD_REQUEST) | Ok(StatusCode::UNPROCESSABLE_ENTITY) => {
                Self::Validation
            }
            _ => Self::Server,
        }
    }

    /// Whether an error message looks like a transport failure
    pub fn is_network_message(message: &str) -> bool {
        NETWORK_MARKERS.iter().any(|marker| message.contains(marker))
    }

    /// Session is no longer usable; the operator has to log in again
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Operator-facing hint shown next to the error banner
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Session expired. Please log in again.",
            Self::Forbidden => {
                "Access denied. If your role was changed recently, log in again to refresh the token."
            }
            Self::Validation => "Check the entered values and try again.",
            Self::NotFound => "The record no longer exists. Reload the list.",
            Self::Server => "Request failed.",
            Self::Network => {
                "Server unavailable. Make sure the backend is running (docker compose up -d)."
            }
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Server => "server",
            Self::Network => "network",
        }
    }
}
