//! Service Model

use serde::{Deserialize, Serialize};

use crate::iot::IotParams;

/// Purchasable wash program of a branch
///
/// The baseline actuator parameters sit at the top level of the JSON
/// object and are collected into [`IotParams`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    #[serde(default)]
    pub org_id: String,
    #[serde(default)]
    pub branch_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub price_per_minute: i32,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub duration_minutes: i32,
    #[serde(default)]
    pub bookable: bool,
    #[serde(default)]
    pub booking_interval_minutes: Option<i32>,
    #[serde(default)]
    pub working_hours: Option<String>,
    #[serde(flatten)]
    pub iot: IotParams,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Create/update service payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_minute: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_interval_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(flatten)]
    pub iot: IotParams,
}
