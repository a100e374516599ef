//! Shared types for the wash network clients
//!
//! The data model consumed from the REST backend, the client-facing auth
//! DTOs, the IoT override merge model and the error taxonomy used by both
//! the admin dashboard client and the mobile app client.

pub mod client;
pub mod error;
pub mod iot;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiErrorBody, ErrorCategory};
pub use iot::{IotField, IotOverride, IotOverrides, IotParams, IotValue};
pub use response::PageContent;
