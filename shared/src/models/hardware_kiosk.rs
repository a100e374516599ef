//! Hardware kiosk model
//!
//! A kiosk registers itself by MAC address (`REGISTERED`) and is later
//! assigned to an organization and optionally a branch by an administrator.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::iot::IotOverrides;

/// Kiosk lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KioskStatus {
    #[default]
    Registered,
    Active,
    Inactive,
}

impl KioskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "REGISTERED",
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for KioskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KioskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "REGISTERED" => Ok(Self::Registered),
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            other => Err(format!("unknown kiosk status: {}", other)),
        }
    }
}

/// Physical wash-box controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareKiosk {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kiosk_id: Option<String>,
    #[serde(default)]
    pub mac_id: String,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub branch_id: Option<String>,
    #[serde(default)]
    pub status: KioskStatus,
    #[serde(default)]
    pub registered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_heartbeat: Option<DateTime<Utc>>,
    #[serde(default, alias = "balance", deserialize_with = "super::null_as_default")]
    pub cash_balance: Decimal,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub iot_overrides: IotOverrides,
}

impl HardwareKiosk {
    /// Owning organization, blank IDs count as unassigned
    pub fn org_id(&self) -> Option<&str> {
        self.org_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn branch_id(&self) -> Option<&str> {
        self.branch_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn is_assigned(&self) -> bool {
        self.org_id().is_some()
    }
}

/// Assignment filter of the kiosk list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KioskAssignment {
    #[default]
    All,
    Assigned,
    Unassigned,
}

impl KioskAssignment {
    pub fn matches(&self, kiosk: &HardwareKiosk) -> bool {
        match self {
            Self::All => true,
            Self::Assigned => kiosk.is_assigned(),
            Self::Unassigned => !kiosk.is_assigned(),
        }
    }
}

impl FromStr for KioskAssignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "assigned" => Ok(Self::Assigned),
            "unassigned" => Ok(Self::Unassigned),
            other => Err(format!("unknown assignment filter: {}", other)),
        }
    }
}

/// Create kiosk payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskCreate {
    pub mac_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kiosk_id: Option<String>,
}

/// Update kiosk payload, always carries the whole override map
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskUpdate {
    pub name: String,
    pub status: KioskStatus,
    pub org_id: Option<String>,
    pub branch_id: Option<String>,
    pub iot_overrides: IotOverrides,
}

/// Assign kiosk payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskAssign {
    pub org_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
}

/// Cash balance top-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopUp {
    pub amount: Decimal,
}
