//! Caller-facing entry point: scope in, calendar document out.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::debug;

use crate::apiary::HiveSource;
use crate::constants::MAX_HORIZON_DAYS;
use crate::error::{HivecalError, HivecalResult};
use crate::ics;
use crate::occurrence::Occurrence;
use crate::schedule;

/// Which hives a feed covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    Apiary(String),
    All,
}

#[derive(Debug, Clone)]
pub struct FeedRequest<Tz: TimeZone> {
    pub scope: FeedScope,
    /// Reference instant; its date in `Tz` is "today" and it doubles as DTSTAMP.
    pub now: DateTime<Tz>,
    pub horizon_days: u32,
}

/// A rendered feed.
#[derive(Debug, Clone, Serialize)]
pub struct Feed {
    pub title: String,
    pub occurrences: Vec<Occurrence>,
    #[serde(skip)]
    pub body: String,
}

/// Resolve the scope's hives, schedule them and render the calendar.
///
/// Unknown apiaries and oversized horizons fail here, before any scheduling happens.
/// In the all-apiaries feed hive ids are prefixed with the apiary slug
/// (`home-yard/h1`), since ids only have to be unique within one apiary.
pub fn build_feed<S, Tz>(source: &S, request: FeedRequest<Tz>) -> HivecalResult<Feed>
where
    S: HiveSource + ?Sized,
    Tz: TimeZone,
{
    check_horizon(request.horizon_days)?;

    let (title, hives) = match &request.scope {
        FeedScope::Apiary(slug) => {
            let apiary = source.apiary(slug)?;
            (format!("{} inspections", apiary.name), apiary.hives)
        }
        FeedScope::All => {
            let hives = source
                .apiaries()?
                .into_iter()
                .flat_map(|apiary| {
                    let slug = apiary.slug;
                    apiary.hives.into_iter().map(move |mut hive| {
                        hive.id = format!("{}/{}", slug, hive.id);
                        hive
                    })
                })
                .collect();
            ("All apiaries inspections".to_string(), hives)
        }
    };

    let generated_at = request.now.with_timezone(&Utc);
    let occurrences = schedule::generate(&hives, request.now, request.horizon_days);
    let body = ics::serialize(&title, &occurrences, generated_at);

    debug!(scope = ?request.scope, events = occurrences.len(), "built inspection feed");

    Ok(Feed {
        title,
        occurrences,
        body,
    })
}

/// Reject horizons above [`MAX_HORIZON_DAYS`].
pub fn check_horizon(days: u32) -> HivecalResult<u32> {
    if days > MAX_HORIZON_DAYS {
        return Err(HivecalError::HorizonTooLong(days));
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apiary::Apiary;
    use std::collections::HashSet;
    use crate::hive::{HiveState, HiveStatus};
    use chrono::NaiveDate;

    struct MemorySource(Vec<Apiary>);

    impl HiveSource for MemorySource {
        fn apiaries(&self) -> HivecalResult<Vec<Apiary>> {
            Ok(self.0.clone())
        }

        fn apiary(&self, slug: &str) -> HivecalResult<Apiary> {
            self.0
                .iter()
                .find(|a| a.slug == slug)
                .cloned()
                .ok_or_else(|| HivecalError::ApiaryNotFound(slug.to_string()))
        }
    }

    fn source() -> MemorySource {
        let mut queen = HiveState::new("h1", "Queen Bee");
        queen.last_inspection_date = NaiveDate::from_ymd_opt(2024, 1, 10);
        let mut sold = HiveState::new("h2", "Sold one");
        sold.status = HiveStatus::Sold;
        let orchard = HiveState::new("h3", "Orchard hive");

        MemorySource(vec![
            Apiary {
                slug: "home-yard".into(),
                name: "Home yard".into(),
                hives: vec![queen, sold],
            },
            Apiary {
                slug: "orchard".into(),
                name: "Orchard".into(),
                hives: vec![orchard],
            },
            Apiary {
                slug: "empty".into(),
                name: "Empty".into(),
                hives: vec![],
            },
        ])
    }

    fn request(scope: FeedScope) -> FeedRequest<Utc> {
        FeedRequest {
            scope,
            now: Utc.with_ymd_and_hms(2024, 1, 12, 7, 0, 0).unwrap(),
            horizon_days: 14,
        }
    }

    #[test]
    fn test_apiary_feed() {
        let feed = build_feed(&source(), request(FeedScope::Apiary("home-yard".into()))).unwrap();

        assert_eq!(feed.title, "Home yard inspections");
        assert!(feed.occurrences.iter().all(|o| o.hive_id == "h1"));
        assert_eq!(
            feed.occurrences.iter().map(|o| o.date).collect::<Vec<_>>(),
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 24).unwrap(),
            ]
        );
        assert!(feed.body.contains("X-WR-CALNAME:Home yard inspections\r\n"));
        assert!(feed.body.contains("DTSTAMP:20240112T070000Z\r\n"));
    }

    #[test]
    fn test_all_apiaries_feed() {
        let feed = build_feed(&source(), request(FeedScope::All)).unwrap();

        assert_eq!(feed.title, "All apiaries inspections");
        // h3 was never inspected, so it leads with today's catch-up event
        assert_eq!(feed.occurrences[0].hive_id, "orchard/h3");
        assert!(feed.occurrences[0].is_overdue());
        assert!(feed.occurrences.iter().any(|o| o.hive_id == "home-yard/h1"));
        assert!(feed.occurrences.iter().all(|o| o.hive_id != "home-yard/h2"));
        assert!(feed.body.contains("UID:orchard/h3-20240112-overdue@hivecal\r\n"));
    }

    #[test]
    fn test_empty_apiary_renders_empty_calendar() {
        let feed = build_feed(&source(), request(FeedScope::Apiary("empty".into()))).unwrap();

        assert!(feed.occurrences.is_empty());
        assert!(!feed.body.contains("BEGIN:VEVENT"));
        assert!(feed.body.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(feed.body.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn test_unknown_apiary_fails_before_scheduling() {
        let result = build_feed(&source(), request(FeedScope::Apiary("meadow".into())));
        assert!(matches!(result, Err(HivecalError::ApiaryNotFound(_))));
    }

    #[test]
    fn test_same_request_gives_identical_bytes() {
        let a = build_feed(&source(), request(FeedScope::All)).unwrap();
        let b = build_feed(&source(), request(FeedScope::All)).unwrap();
        assert_eq!(a.body, b.body);
    }

    #[test]
    fn test_all_feed_keeps_uids_unique_when_apiaries_share_hive_ids() {
        let source = MemorySource(vec![
            Apiary {
                slug: "home-yard".into(),
                name: "Home yard".into(),
                hives: vec![HiveState::new("h1", "Queen Bee")],
            },
            Apiary {
                slug: "orchard".into(),
                name: "Orchard".into(),
                hives: vec![HiveState::new("h1", "Orchard hive")],
            },
        ]);

        let feed = build_feed(&source, request(FeedScope::All)).unwrap();
        let uids: HashSet<&str> = feed.occurrences.iter().map(|o| o.uid.as_str()).collect();

        assert_eq!(feed.occurrences.len(), 6);
        assert_eq!(uids.len(), feed.occurrences.len(), "Duplicate uids in:\n{}", feed.body);
    }

    #[test]
    fn test_apiary_feed_keeps_plain_hive_ids() {
        let feed = build_feed(&source(), request(FeedScope::Apiary("orchard".into()))).unwrap();
        assert!(feed.body.contains("UID:h3-20240112-overdue@hivecal\r\n"));
    }

    #[test]
    fn test_horizon_above_maximum_is_rejected() {
        let mut req = request(FeedScope::All);
        req.horizon_days = MAX_HORIZON_DAYS + 1;
        assert!(matches!(
            build_feed(&source(), req),
            Err(HivecalError::HorizonTooLong(days)) if days == MAX_HORIZON_DAYS + 1
        ));

        let mut req = request(FeedScope::All);
        req.horizon_days = MAX_HORIZON_DAYS;
        assert!(build_feed(&source(), req).is_ok());
    }
}
