//! RFID card model
//!
//! Cards are only kept in the dashboard; the backend exposes no RFID endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfidCard {
    pub id: String,
    /// Masked card number, e.g. `**** 4521`
    pub number: String,
    pub holder: String,
    pub status: String,
    pub linked_at: String,
}
