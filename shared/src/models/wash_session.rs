//! Wash session model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::util::{elapsed_seconds, format_elapsed};

/// Session lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    #[default]
    Pending,
    Active,
    Paused,
    Finished,
    Failed,
}

impl SessionStatus {
    pub const ALL: [SessionStatus; 5] = [
        Self::Active,
        Self::Paused,
        Self::Pending,
        Self::Finished,
        Self::Failed,
    ];

    /// Machine is running or holding the session
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Active | Self::Paused)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Paused => "PAUSED",
            Self::Finished => "FINISHED",
            Self::Failed => "FAILED",
        }
    }

    /// Operator-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Ожидание",
            Self::Active => "Активна",
            Self::Paused => "Пауза",
            Self::Finished => "Завершена",
            Self::Failed => "Ошибка",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown session status: {}", s))
    }
}

/// A paid usage of one kiosk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WashSession {
    pub id: String,
    #[serde(default)]
    pub kiosk_id: String,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub branch_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub paid_amount: Decimal,
    #[serde(default)]
    pub command_id: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl WashSession {
    /// Live elapsed-time label, only for running or paused sessions
    pub fn elapsed_label(&self, now: DateTime<Utc>) -> Option<String> {
        if !self.status.is_live() {
            return None;
        }
        self.started_at
            .map(|started| format_elapsed(elapsed_seconds(started, now)))
    }
}
