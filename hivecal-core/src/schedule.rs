//! Inspection occurrence generation.
//!
//! Projects each active hive's cadence forward from its last inspection and
//! collapses any number of missed cycles into a single catch-up event dated today.

use chrono::{DateTime, Days, NaiveDate, TimeZone};
use tracing::debug;

use crate::hive::HiveState;
use crate::occurrence::Occurrence;

/// The next actionable inspection date for a hive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextDue {
    pub date: NaiveDate,
    pub overdue: bool,
}

/// Generate overdue and upcoming inspection occurrences for `hives`.
///
/// Only the calendar date of `now` (in its own timezone) is used. Occurrences
/// run through `today + horizon_days` inclusive and come back sorted by date,
/// with equal dates kept in hive order.
pub fn generate<Tz: TimeZone>(
    hives: &[HiveState],
    now: DateTime<Tz>,
    horizon_days: u32,
) -> Vec<Occurrence> {
    let today = now.date_naive();
    let horizon_end = today
        .checked_add_days(Days::new(u64::from(horizon_days)))
        .unwrap_or(NaiveDate::MAX);

    let mut occurrences: Vec<Occurrence> = hives
        .iter()
        .filter(|hive| hive.is_active())
        .flat_map(|hive| occurrences_for(hive, today, horizon_end))
        .collect();

    // Stable, so same-day occurrences keep hive order
    occurrences.sort_by_key(|occ| occ.date);

    debug!(
        hives = hives.len(),
        occurrences = occurrences.len(),
        %today,
        horizon_days,
        "generated inspection occurrences"
    );

    occurrences
}

/// Next due date for a single hive, or `None` if the hive isn't scheduled.
pub fn next_due(hive: &HiveState, today: NaiveDate) -> Option<NextDue> {
    if !hive.is_active() {
        return None;
    }

    let step = Days::new(hive.frequency_days().unsigned_abs());

    match hive.last_inspection_date {
        None => Some(NextDue {
            date: today,
            overdue: true,
        }),
        Some(last) => {
            let due = last.checked_add_days(step)?;
            if due < today {
                Some(NextDue {
                    date: today,
                    overdue: true,
                })
            } else {
                Some(NextDue {
                    date: due,
                    overdue: false,
                })
            }
        }
    }
}

fn occurrences_for(hive: &HiveState, today: NaiveDate, horizon_end: NaiveDate) -> Vec<Occurrence> {
    let step = Days::new(hive.frequency_days().unsigned_abs());
    let mut occurrences = Vec::new();

    // Overdue hives are re-anchored on today rather than keeping their old phase
    let anchor = match next_due(hive, today) {
        Some(NextDue { overdue: true, .. }) => {
            occurrences.push(Occurrence::overdue(hive, today));
            today.checked_add_days(step)
        }
        Some(NextDue { date, .. }) => Some(date),
        None => None,
    };

    let mut next = anchor;
    while let Some(date) = next {
        if date > horizon_end {
            break;
        }
        if date >= today {
            occurrences.push(Occurrence::scheduled(hive, date));
        }
        next = date.checked_add_days(step);
    }

    occurrences
}
