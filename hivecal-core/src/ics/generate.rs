//! Feed serialization (RFC 5545).

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::constants::{PRODID, UID_DOMAIN};
use crate::occurrence::Occurrence;

const CRLF: &str = "\r\n";

/// Render occurrences as a VCALENDAR document.
///
/// Events are written in the order given. `generated_at` becomes the DTSTAMP
/// of every event. An empty slice still produces a valid calendar.
pub fn serialize(feed_title: &str, occurrences: &[Occurrence], generated_at: DateTime<Utc>) -> String {
    let title = escape_text(feed_title);
    let dtstamp = generated_at.format("%Y%m%dT%H%M%SZ").to_string();

    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", PRODID),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        format!("X-WR-CALNAME:{}", title),
        format!("X-WR-CALDESC:{}", title),
    ];

    for occ in occurrences {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}@{}", occ.uid, UID_DOMAIN));
        lines.push(format!("DTSTAMP:{}", dtstamp));
        lines.push(format!("DTSTART;VALUE=DATE:{}", format_date(occ.date)));
        lines.push(format!("DTEND;VALUE=DATE:{}", format_date(exclusive_end(occ.date))));
        lines.push(format!("SUMMARY:{}", escape_text(&occ.summary)));
        lines.push(format!("DESCRIPTION:{}", escape_text(&occ.description)));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    let mut output = lines.join(CRLF);
    output.push_str(CRLF);
    output
}

/// Escape a TEXT value (RFC 5545 section 3.3.11).
///
/// Backslashes go first so the escapes added afterwards aren't doubled.
/// CRLF and lone CR count as a single line break.
pub fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace(['\r', '\n'], "\\n")
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// All-day events end on the following day (DTEND is exclusive).
fn exclusive_end(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hive::HiveState;
    use crate::schedule::generate;
    use chrono::TimeZone;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 5).unwrap()
    }

    fn make_occurrences() -> Vec<Occurrence> {
        let mut never = HiveState::new("h1", "Queen Bee");
        never.inspection_frequency_days = Some(7);
        let mut late = HiveState::new("h2", "Nuc, East; Row");
        late.last_inspection_date = NaiveDate::from_ymd_opt(2023, 12, 1);

        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        generate(&[never, late], now, 14)
    }

    #[test]
    fn test_empty_feed_is_header_and_footer_only() {
        let ics = serialize("Home yard", &[], generated_at());

        assert_eq!(
            ics,
            "BEGIN:VCALENDAR\r\n\
             VERSION:2.0\r\n\
             PRODID:-//Hivecal//Inspection Schedule//EN\r\n\
             CALSCALE:GREGORIAN\r\n\
             METHOD:PUBLISH\r\n\
             X-WR-CALNAME:Home yard\r\n\
             X-WR-CALDESC:Home yard\r\n\
             END:VCALENDAR\r\n"
        );
    }

    #[test]
    fn test_single_event_layout() {
        let hive = HiveState::new("h1", "Queen Bee");
        let date = NaiveDate::from_ymd_opt(2024, 1, 22).unwrap();
        let occ = Occurrence::scheduled(&hive, date);

        let ics = serialize("Home yard", &[occ], generated_at());
        let event: Vec<&str> = ics
            .split("\r\n")
            .skip_while(|l| *l != "BEGIN:VEVENT")
            .take_while(|l| *l != "END:VCALENDAR")
            .collect();

        assert_eq!(
            event,
            vec![
                "BEGIN:VEVENT",
                "UID:h1-20240122-scheduled@hivecal",
                "DTSTAMP:20240115T083005Z",
                "DTSTART;VALUE=DATE:20240122",
                "DTEND;VALUE=DATE:20240123",
                "SUMMARY:Inspect Queen Bee",
                "DESCRIPTION:Routine inspection of hive Queen Bee (every 7 days).",
                "END:VEVENT",
            ]
        );
    }

    #[test]
    fn test_one_vevent_per_occurrence() {
        let occurrences = make_occurrences();
        let ics = serialize("Feed", &occurrences, generated_at());

        let begins = ics.lines().filter(|l| *l == "BEGIN:VEVENT").count();
        let ends = ics.lines().filter(|l| *l == "END:VEVENT").count();
        assert_eq!(begins, occurrences.len());
        assert_eq!(ends, occurrences.len());
    }

    #[test]
    fn test_dtend_is_day_after_dtstart() {
        let ics = serialize("Feed", &make_occurrences(), generated_at());

        let starts: Vec<NaiveDate> = ics
            .lines()
            .filter_map(|l| l.strip_prefix("DTSTART;VALUE=DATE:"))
            .map(|s| NaiveDate::parse_from_str(s, "%Y%m%d").unwrap())
            .collect();
        let ends: Vec<NaiveDate> = ics
            .lines()
            .filter_map(|l| l.strip_prefix("DTEND;VALUE=DATE:"))
            .map(|s| NaiveDate::parse_from_str(s, "%Y%m%d").unwrap())
            .collect();

        assert!(!starts.is_empty());
        assert_eq!(starts.len(), ends.len());
        for (start, end) in starts.iter().zip(&ends) {
            assert_eq!((*end - *start).num_days(), 1, "DTEND must follow DTSTART. ICS:\n{}", ics);
        }
    }

    #[test]
    fn test_dtend_crosses_month_and_year() {
        let hive = HiveState::new("h1", "Queen Bee");
        let occ = Occurrence::scheduled(&hive, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        let ics = serialize("Feed", &[occ], generated_at());

        assert!(ics.contains("DTSTART;VALUE=DATE:20241231\r\n"));
        assert!(ics.contains("DTEND;VALUE=DATE:20250101\r\n"));
    }

    #[test]
    fn test_dtstamp_shared_by_all_events() {
        let ics = serialize("Feed", &make_occurrences(), generated_at());
        let stamps: Vec<&str> = ics.lines().filter(|l| l.starts_with("DTSTAMP:")).collect();

        assert!(stamps.len() > 1);
        assert!(stamps.iter().all(|s| *s == "DTSTAMP:20240115T083005Z"));
    }

    #[test]
    fn test_every_line_ends_with_crlf() {
        let ics = serialize("Feed", &make_occurrences(), generated_at());

        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert_eq!(ics.matches('\n').count(), ics.matches("\r\n").count());
    }

    #[test]
    fn test_serializer_keeps_given_order() {
        let mut occurrences = make_occurrences();
        occurrences.reverse();
        let ics = serialize("Feed", &occurrences, generated_at());

        let uids: Vec<&str> = ics.lines().filter_map(|l| l.strip_prefix("UID:")).collect();
        let expected: Vec<String> = occurrences
            .iter()
            .map(|o| format!("{}@hivecal", o.uid))
            .collect();
        assert_eq!(uids, expected);
    }

    #[test]
    fn test_summary_and_title_are_escaped() {
        let ics = serialize("Bees; east, west", &make_occurrences(), generated_at());

        assert!(ics.contains("X-WR-CALNAME:Bees\\; east\\, west\r\n"));
        assert!(ics.contains("X-WR-CALDESC:Bees\\; east\\, west\r\n"));
        assert!(
            ics.contains("SUMMARY:Overdue: inspect Nuc\\, East\\; Row\r\n"),
            "Summary not escaped. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_escape_backslash() {
        assert_eq!(escape_text(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_escape_semicolon() {
        assert_eq!(escape_text("a;b"), r"a\;b");
    }

    #[test]
    fn test_escape_comma() {
        assert_eq!(escape_text("a,b"), r"a\,b");
    }

    #[test]
    fn test_escape_newlines() {
        assert_eq!(escape_text("a\nb"), r"a\nb");
        assert_eq!(escape_text("a\r\nb"), r"a\nb");
        assert_eq!(escape_text("a\rb"), r"a\nb");
    }

    #[test]
    fn test_escape_order_does_not_double_escape() {
        assert_eq!(escape_text("\\;"), r"\\\;");
        assert_eq!(escape_text("\\,\n"), r"\\\,\n");
        assert_eq!(escape_text(r"\n"), r"\\n");
    }

    #[test]
    fn test_escape_leaves_other_characters_alone() {
        let text = "Hive Ä: \"queen\" 🐝 (box #2) <ok> 'x'";
        assert_eq!(escape_text(text), text);
    }
}
