//! Reading feeds back using the icalendar crate's parser.

use chrono::NaiveDate;
use icalendar::{
    DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::error::{HivecalError, HivecalResult};

/// An event as read from a feed file.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEvent {
    pub uid: String,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub summary: Option<String>,
    pub description: Option<String>,
}

/// Parse every VEVENT of a feed.
pub fn parse_feed(content: &str) -> HivecalResult<Vec<FeedEvent>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| HivecalError::IcsParse(e.to_string()))?;

    let mut events = Vec::new();
    for component in &calendar.components {
        if component.name == "VCALENDAR" {
            for inner in component.components.iter().filter(|c| c.name == "VEVENT") {
                events.push(parse_event(inner)?);
            }
        } else if component.name == "VEVENT" {
            events.push(parse_event(component)?);
        }
    }

    Ok(events)
}

fn parse_event(vevent: &Component) -> HivecalResult<FeedEvent> {
    let uid = vevent
        .find_prop("UID")
        .map(|p| p.val.to_string())
        .ok_or_else(|| HivecalError::IcsParse("VEVENT without UID".into()))?;

    let start = vevent
        .find_prop("DTSTART")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .and_then(to_date)
        .ok_or_else(|| HivecalError::IcsParse(format!("Event '{}' has no usable DTSTART", uid)))?;

    let end = vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .and_then(to_date);

    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| unescape_text(p.val.as_ref()));
    let description = vevent
        .find_prop("DESCRIPTION")
        .map(|p| unescape_text(p.val.as_ref()));

    Ok(FeedEvent {
        uid,
        start,
        end,
        summary,
        description,
    })
}

fn to_date(dpt: DatePerhapsTime) -> Option<NaiveDate> {
    match dpt {
        DatePerhapsTime::Date(d) => Some(d),
        DatePerhapsTime::DateTime(_) => None,
    }
}

/// Reverse of [`escape_text`](super::escape_text). Unknown escapes are kept as-is.
pub fn unescape_text(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => result.push('\n'),
            Some(escaped @ ('\\' | ';' | ',')) => result.push(escaped),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}
