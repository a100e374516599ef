//! Data models
//!
//! Entities and payloads consumed from the wash network backend.
//! All IDs are opaque strings; JSON uses camelCase names.
//! Deleting any entity archives it on the backend (soft delete).

pub mod account;
pub mod app;
pub mod branch;
pub mod device;
pub mod hardware_kiosk;
pub mod organization;
pub mod payment;
pub mod promotion;
pub mod rfid_card;
pub mod service;
pub mod wash_session;

// Re-exports
pub use account::*;
pub use app::*;
pub use branch::*;
pub use device::*;
pub use hardware_kiosk::*;
pub use organization::*;
pub use payment::*;
pub use promotion::*;
pub use rfid_card::*;
pub use service::*;
pub use wash_session::*;

use serde::{Deserialize, Deserializer};

/// Confirmation shown before any delete
pub const ARCHIVE_WARNING: &str =
    "The record will be archived. It disappears from lists but stays in the database.";

/// Treat an explicit JSON `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
