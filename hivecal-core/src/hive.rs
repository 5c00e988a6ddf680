//! Hive state as supplied by the persistence layer.
//!
//! The engine only reads these values; it never mutates or stores them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_FREQUENCY_DAYS;

/// A hive and the part of its inspection history the scheduler needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiveState {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: HiveStatus,

    /// Days between inspections. Unset or non-positive values fall back to the default cadence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_frequency_days: Option<i64>,

    /// Date of the most recent completed inspection. `None` means never inspected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_inspection_date: Option<NaiveDate>,
}

impl HiveState {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        HiveState {
            id: id.into(),
            name: name.into(),
            status: HiveStatus::Active,
            inspection_frequency_days: None,
            last_inspection_date: None,
        }
    }

    /// Effective inspection cadence in days (always positive).
    pub fn frequency_days(&self) -> i64 {
        match self.inspection_frequency_days {
            Some(days) if days > 0 => days,
            _ => DEFAULT_FREQUENCY_DAYS,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == HiveStatus::Active
    }
}

/// Lifecycle status of a hive. Only active hives get inspections scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum HiveStatus {
    Active,
    Inactive,
    Dead,
    Sold,
    /// Anything the persistence layer reports that we don't recognise.
    #[default]
    Unknown,
}

impl From<String> for HiveStatus {
    fn from(value: String) -> Self {
        HiveStatus::from(value.as_str())
    }
}

impl From<&str> for HiveStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => HiveStatus::Active,
            "inactive" => HiveStatus::Inactive,
            "dead" => HiveStatus::Dead,
            "sold" => HiveStatus::Sold,
            _ => HiveStatus::Unknown,
        }
    }
}

impl HiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HiveStatus::Active => "active",
            HiveStatus::Inactive => "inactive",
            HiveStatus::Dead => "dead",
            HiveStatus::Sold => "sold",
            HiveStatus::Unknown => "unknown",
        }
    }
}
