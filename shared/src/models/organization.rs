//! Organization Model

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Partner business type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartnerType {
    CarWash,
    GasStation,
    Service,
}

impl PartnerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CarWash => "CAR_WASH",
            Self::GasStation => "GAS_STATION",
            Self::Service => "SERVICE",
        }
    }
}

impl FromStr for PartnerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "CAR_WASH" => Ok(Self::CarWash),
            "GAS_STATION" => Ok(Self::GasStation),
            "SERVICE" => Ok(Self::Service),
            other => Err(format!("unknown partner type: {}", other)),
        }
    }
}

/// Partner organization (tenant)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub inn: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub partner_type: Option<PartnerType>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub working_hours: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Create/update organization payload (only filled fields are sent)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_type: Option<PartnerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Bulk kiosk attachment body
///
/// Only kiosks without an organization are attached; the backend reports
/// how many were.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachKiosks {
    #[serde(rename = "hardwareKioskIds", alias = "kioskIds")]
    pub kiosk_ids: Vec<String>,
}

/// Answer of the attach call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachedKiosks {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub attached_count: u32,
}
