//! IoT override merge model
//!
//! Every [`Service`] carries baseline actuator parameters ([`IotParams`]).
//! A hardware kiosk may store a sparse [`IotOverride`] per service, keyed by
//! service ID, to account for its own wiring or motor tuning. The effective
//! parameter set for a (kiosk, service) pair is computed field by field: the
//! override value when present and non-empty, the service baseline otherwise.
//!
//! `command` is part of the baseline only. The backend persists overrides
//! without it, so a kiosk always runs the service's command.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Service;

/// Override model errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IotError {
    #[error("unknown IoT field: {0}")]
    UnknownField(String),

    #[error("{field} expects a number, got {value:?}")]
    InvalidNumber { field: IotField, value: String },

    #[error("{field} expects a {expected} value")]
    TypeMismatch {
        field: IotField,
        expected: &'static str,
    },
}

/// Overridable actuator field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IotField {
    RelayBits,
    MotorFlag,
    MotorFrequency,
    Pump1Power,
    Pump2Power,
    Pump3Power,
    Pump4Power,
}

impl IotField {
    pub const ALL: [IotField; 7] = [
        Self::RelayBits,
        Self::MotorFlag,
        Self::MotorFrequency,
        Self::Pump1Power,
        Self::Pump2Power,
        Self::Pump3Power,
        Self::Pump4Power,
    ];

    /// JSON field name
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::RelayBits => "relayBits",
            Self::MotorFlag => "motorFlag",
            Self::MotorFrequency => "motorFrequency",
            Self::Pump1Power => "pump1Power",
            Self::Pump2Power => "pump2Power",
            Self::Pump3Power => "pump3Power",
            Self::Pump4Power => "pump4Power",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::RelayBits | Self::MotorFlag)
    }
}

impl fmt::Display for IotField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for IotField {
    type Err = IotError;

    /// Accepts the wire name in any case, with or without `_`/`-` separators
    /// (`pump2Power`, `pump2_power`, `PUMP2-POWER`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name().to_lowercase() == folded)
            .ok_or_else(|| IotError::UnknownField(s.to_string()))
    }
}

/// Typed field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IotValue {
    Text(String),
    Number(i32),
}

impl IotValue {
    /// Parse raw operator input for `field`
    pub fn parse_for(field: IotField, raw: &str) -> Result<Self, IotError> {
        let raw = raw.trim();
        if field.is_numeric() {
            raw.parse::<i32>()
                .map(Self::Number)
                .map_err(|_| IotError::InvalidNumber {
                    field,
                    value: raw.to_string(),
                })
        } else {
            Ok(Self::Text(raw.to_string()))
        }
    }
}

impl fmt::Display for IotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

fn non_empty(text: &Option<String>) -> Option<&String> {
    text.as_ref().filter(|t| !t.trim().is_empty())
}

/// Baseline actuator parameters of a service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IotParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay_bits: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motor_flag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motor_frequency: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump1_power: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump2_power: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump3_power: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump4_power: Option<i32>,
}

impl IotParams {
    /// Value of an overridable field
    pub fn get(&self, field: IotField) -> Option<IotValue> {
        match field {
            IotField::RelayBits => non_empty(&self.relay_bits).cloned().map(IotValue::Text),
            IotField::MotorFlag => non_empty(&self.motor_flag).cloned().map(IotValue::Text),
            IotField::MotorFrequency => self.motor_frequency.map(IotValue::Number),
            IotField::Pump1Power => self.pump1_power.map(IotValue::Number),
            IotField::Pump2Power => self.pump2_power.map(IotValue::Number),
            IotField::Pump3Power => self.pump3_power.map(IotValue::Number),
            IotField::Pump4Power => self.pump4_power.map(IotValue::Number),
        }
    }

    /// Layer `over` on top of these parameters, field by field
    pub fn merged_with(&self, over: Option<&IotOverride>) -> IotParams {
        let Some(over) = over else {
            return self.clone();
        };
        IotParams {
            relay_bits: non_empty(&over.relay_bits)
                .or(self.relay_bits.as_ref())
                .cloned(),
            command: self.command.clone(),
            motor_flag: non_empty(&over.motor_flag)
                .or(self.motor_flag.as_ref())
                .cloned(),
            motor_frequency: over.motor_frequency.or(self.motor_frequency),
            pump1_power: over.pump1_power.or(self.pump1_power),
            pump2_power: over.pump2_power.or(self.pump2_power),
            pump3_power: over.pump3_power.or(self.pump3_power),
            pump4_power: over.pump4_power.or(self.pump4_power),
        }
    }
}

/// Sparse per-kiosk, per-service override
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IotOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay_bits: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motor_flag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motor_frequency: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump1_power: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump2_power: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump3_power: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump4_power: Option<i32>,
}

impl IotOverride {
    /// Full copy of the overridable baseline fields
    pub fn from_baseline(baseline: &IotParams) -> Self {
        Self {
            relay_bits: baseline.relay_bits.clone(),
            motor_flag: baseline.motor_flag.clone(),
            motor_frequency: baseline.motor_frequency,
            pump1_power: baseline.pump1_power,
            pump2_power: baseline.pump2_power,
            pump3_power: baseline.pump3_power,
            pump4_power: baseline.pump4_power,
        }
    }

    /// Overridden value, empty strings count as not overridden
    pub fn get(&self, field: IotField) -> Option<IotValue> {
        match field {
            IotField::RelayBits => non_empty(&self.relay_bits).cloned().map(IotValue::Text),
            IotField::MotorFlag => non_empty(&self.motor_flag).cloned().map(IotValue::Text),
            IotField::MotorFrequency => self.motor_frequency.map(IotValue::Number),
            IotField::Pump1Power => self.pump1_power.map(IotValue::Number),
            IotField::Pump2Power => self.pump2_power.map(IotValue::Number),
            IotField::Pump3Power => self.pump3_power.map(IotValue::Number),
            IotField::Pump4Power => self.pump4_power.map(IotValue::Number),
        }
    }

    pub fn set(&mut self, field: IotField, value: IotValue) -> Result<(), IotError> {
        match (field, value) {
            (IotField::RelayBits, IotValue::Text(text)) => self.relay_bits = Some(text),
            (IotField::MotorFlag, IotValue::Text(text)) => self.motor_flag = Some(text),
            (IotField::MotorFrequency, IotValue::Number(n)) => self.motor_frequency = Some(n),
            (IotField::Pump1Power, IotValue::Number(n)) => self.pump1_power = Some(n),
            (IotField::Pump2Power, IotValue::Number(n)) => self.pump2_power = Some(n),
            (IotField::Pump3Power, IotValue::Number(n)) => self.pump3_power = Some(n),
            (IotField::Pump4Power, IotValue::Number(n)) => self.pump4_power = Some(n),
            (field, _) => {
                return Err(IotError::TypeMismatch {
                    field,
                    expected: if field.is_numeric() { "numeric" } else { "text" },
                });
            }
        }
        Ok(())
    }

    /// Reset a field so it falls back to the baseline
    pub fn clear(&mut self, field: IotField) {
        match field {
            IotField::RelayBits => self.relay_bits = None,
            IotField::MotorFlag => self.motor_flag = None,
            IotField::MotorFrequency => self.motor_frequency = None,
            IotField::Pump1Power => self.pump1_power = None,
            IotField::Pump2Power => self.pump2_power = None,
            IotField::Pump3Power => self.pump3_power = None,
            IotField::Pump4Power => self.pump4_power = None,
        }
    }

    /// No field overrides anything
    pub fn is_empty(&self) -> bool {
        IotField::ALL.iter().all(|field| self.get(*field).is_none())
    }

    /// Fields that currently override the baseline
    pub fn overridden_fields(&self) -> Vec<IotField> {
        IotField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_some())
            .collect()
    }
}

/// Per-kiosk override map, keyed by service ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IotOverrides(BTreeMap<String, IotOverride>);

impl IotOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, service_id: &str) -> Option<&IotOverride> {
        self.0.get(service_id)
    }

    pub fn insert(&mut self, service_id: impl Into<String>, entry: IotOverride) {
        self.0.insert(service_id.into(), entry);
    }

    pub fn remove(&mut self, service_id: &str) -> Option<IotOverride> {
        self.0.remove(service_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &IotOverride)> {
        self.0.iter()
    }

    /// Whether the kiosk overrides anything for this service
    pub fn is_overridden(&self, service_id: &str) -> bool {
        self.get(service_id).is_some_and(|entry| !entry.is_empty())
    }

    /// Effective parameters for this kiosk running a service with `baseline`
    pub fn effective(&self, service_id: &str, baseline: &IotParams) -> IotParams {
        baseline.merged_with(self.get(service_id))
    }

    /// Effective parameters for this kiosk running `service`
    pub fn effective_for(&self, service: &Service) -> IotParams {
        self.effective(&service.id, &service.iot)
    }

    /// Seed an entry per service with a full copy of its baseline.
    ///
    /// Entries for services outside `services` are left alone. Running it
    /// twice with the same services yields the same map.
    pub fn populate_defaults<'a>(&mut self, services: impl IntoIterator<Item = &'a Service>) {
        for service in services {
            self.0
                .insert(service.id.clone(), IotOverride::from_baseline(&service.iot));
        }
    }

    pub fn set_field(
        &mut self,
        service_id: &str,
        field: IotField,
        value: IotValue,
    ) -> Result<(), IotError> {
        let mut entry = self.0.get(service_id).cloned().unwrap_or_default();
        entry.set(field, value)?;
        self.0.insert(service_id.to_string(), entry);
        Ok(())
    }

    /// Reset one field; drops the entry once nothing is overridden.
    ///
    /// Returns `true` when the entry was removed.
    pub fn clear_field(&mut self, service_id: &str, field: IotField) -> bool {
        let Some(entry) = self.0.get_mut(service_id) else {
            return false;
        };
        entry.clear(field);
        if entry.is_empty() {
            self.0.remove(service_id);
            return true;
        }
        false
    }

    /// Drop entries with no overridden field
    pub fn compact(&mut self) {
        self.0.retain(|_, entry| !entry.is_empty());
    }

    /// Service IDs with an entry outside `service_ids`
    pub fn orphaned<'a>(&self, service_ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let known: BTreeSet<&str> = service_ids.into_iter().collect();
        self.0
            .keys()
            .filter(|id| !known.contains(id.as_str()))
            .cloned()
            .collect()
    }

    /// Keep only entries for `service_ids`; returns the removed keys
    pub fn retain_services<'a>(
        &mut self,
        service_ids: impl IntoIterator<Item = &'a str>,
    ) -> Vec<String> {
        let known: BTreeSet<&str> = service_ids.into_iter().collect();
        let removed: Vec<String> = self
            .0
            .keys()
            .filter(|id| !known.contains(id.as_str()))
            .cloned()
            .collect();
        for id in &removed {
            self.0.remove(id);
        }
        removed
    }
}

impl FromIterator<(String, IotOverride)> for IotOverrides {
    fn from_iter<I: IntoIterator<Item = (String, IotOverride)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
