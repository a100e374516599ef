//! Mobile app models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Mobile app customer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUser {
    pub id: String,
    pub phone: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub car_model: Option<String>,
    #[serde(default)]
    pub car_number: Option<String>,
}

/// Profile update body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub wallet_id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub balance: Decimal,
    #[serde(default)]
    pub currency: String,
}

/// Kiosk resolved from a scanned QR code
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrScanResult {
    pub mac_id: String,
    #[serde(default)]
    pub branch_id: Option<String>,
    #[serde(default)]
    pub kiosk_id: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// Order history entries are rendered as-is
pub type AppOrder = serde_json::Value;
