//! Branch Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::PartnerType;

/// Branch operating status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BranchStatus {
    #[default]
    Open,
    Closed,
    Maintenance,
}

impl BranchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Maintenance => "MAINTENANCE",
        }
    }
}

impl fmt::Display for BranchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BranchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OPEN" => Ok(Self::Open),
            "CLOSED" => Ok(Self::Closed),
            "MAINTENANCE" => Ok(Self::Maintenance),
            other => Err(format!("unknown branch status: {}", other)),
        }
    }
}

/// Physical car-wash location of an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: String,
    pub org_id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub status: BranchStatus,
    #[serde(default)]
    pub partner_type: Option<PartnerType>,
    #[serde(default)]
    pub box_count: Option<u32>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub working_hours: Option<String>,
}

/// Create branch payload
///
/// `boxCount` asks the backend to register that many wash boxes with the
/// branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchCreate {
    pub org_id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub status: BranchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_type: Option<PartnerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_count: Option<u32>,
}

/// Update branch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchUpdate {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub status: BranchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_type: Option<PartnerType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_create_carries_box_count() {
        let payload = BranchCreate {
            org_id: "org-1".into(),
            name: "Chilonzor".into(),
            address: "Bunyodkor 1".into(),
            phone: "+998901234567".into(),
            status: BranchStatus::Open,
            partner_type: None,
            box_count: Some(4),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["boxCount"], 4);
        assert_eq!(json["status"], "OPEN");
        assert!(json.get("partnerType").is_none());
    }

    #[test]
    fn test_branch_minimal_json() {
        let branch: Branch =
            serde_json::from_str(r#"{"id":"b1","orgId":"o1","name":"Yunusobod"}"#).unwrap();
        assert_eq!(branch.status, BranchStatus::Open);
        assert!(branch.box_count.is_none());
    }
}
