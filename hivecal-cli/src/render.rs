//! Colored terminal rendering for hivecal-core types.

use chrono::NaiveDate;
use hivecal_core::Occurrence;
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Occurrence {
    fn render(&self) -> String {
        if self.is_overdue() {
            format!("  {} {}", "!".red().bold(), self.summary.red())
        } else {
            format!("  {} {}", "·".dimmed(), self.summary)
        }
    }
}

/// Label a day relative to `today` (e.g. "Today", "Tomorrow", "Wed Feb 21")
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_label() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 19).unwrap();

        assert_eq!(date_label(today, today), "Today");
        assert_eq!(date_label(today.succ_opt().unwrap(), today), "Tomorrow");
        assert_eq!(
            date_label(NaiveDate::from_ymd_opt(2024, 2, 21).unwrap(), today),
            "Wed Feb 21"
        );
    }
}
