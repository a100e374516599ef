//! Payment transaction model and report filters

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    Cash,
    Rfid,
    Online,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Rfid => "RFID",
            Self::Online => "ONLINE",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CASH" => Ok(Self::Cash),
            "RFID" => Ok(Self::Rfid),
            "ONLINE" => Ok(Self::Online),
            other => Err(format!("unknown payment type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    #[default]
    Success,
    Failed,
    Refunded,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Refunded => "REFUNDED",
        })
    }
}

/// One payment, newest first in listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTransaction {
    pub id: String,
    pub payment_type: PaymentType,
    #[serde(default)]
    pub kiosk_id: String,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub branch_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub rfid_card_id: Option<String>,
    #[serde(default)]
    pub wash_session_id: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_currency() -> String {
    "UZS".to_string()
}

/// Count and sum of successful payments
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTotals {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub total: Decimal,
}

/// `GET /api/v1/admin/payments/summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    #[serde(rename = "CASH", default)]
    pub cash: PaymentTotals,
    #[serde(rename = "RFID", default)]
    pub rfid: PaymentTotals,
    #[serde(rename = "ONLINE", default)]
    pub online: PaymentTotals,
    #[serde(rename = "ALL", default)]
    pub all: PaymentTotals,
}

impl PaymentSummary {
    pub fn by_type(&self, payment_type: PaymentType) -> &PaymentTotals {
        match payment_type {
            PaymentType::Cash => &self.cash,
            PaymentType::Rfid => &self.rfid,
            PaymentType::Online => &self.online,
        }
    }
}

/// Query parameters of the payment list and summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFilter {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Kiosk MAC ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kiosk_id: Option<String>,
    /// UTC calendar day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl PaymentFilter {
    /// Summary ignores the payment type, it reports every type at once
    pub fn for_summary(&self) -> Self {
        Self {
            payment_type: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_deserialize() {
        let json = r#"{
            "CASH": {"count": 5, "total": 250000},
            "RFID": {"count": 0, "total": 0},
            "ONLINE": {"count": 2, "total": 30000.50},
            "ALL": {"count": 7, "total": 280000.50}
        }"#;
        let summary: PaymentSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.by_type(PaymentType::Cash).count, 5);
        assert_eq!(summary.all.total, "280000.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_filter_query_names() {
        let filter = PaymentFilter {
            payment_type: Some(PaymentType::Cash),
            date: NaiveDate::from_ymd_opt(2026, 2, 27),
            ..Default::default()
        };
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "CASH", "date": "2026-02-27" }));
        assert!(filter.for_summary().payment_type.is_none());
    }

    #[test]
    fn test_transaction_defaults() {
        let tx: PaymentTransaction = serde_json::from_str(
            r#"{"id":"p1","paymentType":"ONLINE","kioskId":"m","amount":null}"#,
        )
        .unwrap();
        assert_eq!(tx.currency, "UZS");
        assert_eq!(tx.status, PaymentStatus::Success);
        assert_eq!(tx.amount, Decimal::ZERO);
    }
}
