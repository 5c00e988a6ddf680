//! Computed inspection occurrences.

use chrono::NaiveDate;
use serde::Serialize;

use crate::hive::HiveState;

/// Whether an occurrence is the catch-up event for missed inspections
/// or a regular projected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OccurrenceKind {
    Overdue,
    Scheduled,
}

impl OccurrenceKind {
    /// Token used inside uids. Distinct per kind so an overdue and a scheduled
    /// occurrence on the same day can never collide.
    pub fn as_str(&self) -> &'static str {
        match self {
            OccurrenceKind::Overdue => "overdue",
            OccurrenceKind::Scheduled => "scheduled",
        }
    }
}

/// One inspection event for one hive. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occurrence {
    pub hive_id: String,
    pub hive_name: String,
    pub date: NaiveDate,
    pub kind: OccurrenceKind,
    pub uid: String,
    pub summary: String,
    pub description: String,
}

impl Occurrence {
    pub fn overdue(hive: &HiveState, today: NaiveDate) -> Self {
        let frequency = hive.frequency_days();
        let history = match hive.last_inspection_date {
            Some(last) => format!("Last inspected {}.", last.format("%Y-%m-%d")),
            None => "Never inspected.".to_string(),
        };

        Occurrence {
            hive_id: hive.id.clone(),
            hive_name: hive.name.clone(),
            date: today,
            kind: OccurrenceKind::Overdue,
            uid: occurrence_uid(&hive.id, today, OccurrenceKind::Overdue),
            summary: format!("Overdue: inspect {}", hive.name),
            description: format!(
                "Inspection of hive {} is overdue (every {} days). {}",
                hive.name, frequency, history
            ),
        }
    }

    pub fn scheduled(hive: &HiveState, date: NaiveDate) -> Self {
        Occurrence {
            hive_id: hive.id.clone(),
            hive_name: hive.name.clone(),
            date,
            kind: OccurrenceKind::Scheduled,
            uid: occurrence_uid(&hive.id, date, OccurrenceKind::Scheduled),
            summary: format!("Inspect {}", hive.name),
            description: format!(
                "Routine inspection of hive {} (every {} days).",
                hive.name,
                hive.frequency_days()
            ),
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.kind == OccurrenceKind::Overdue
    }
}

/// Stable uid for a (hive, date, kind) triple, e.g. `h1-20240115-overdue`.
pub fn occurrence_uid(hive_id: &str, date: NaiveDate, kind: OccurrenceKind) -> String {
    format!("{}-{}-{}", hive_id, date.format("%Y%m%d"), kind.as_str())
}
