pub mod apiaries;
pub mod feed;
pub mod upcoming;
pub mod verify;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use hivecal_core::config::HivecalConfig;
use hivecal_core::feed::{FeedRequest, FeedScope};

/// Scope, reference time and horizon shared by `feed` and `upcoming`.
pub struct ScheduleOptions {
    pub scope: FeedScope,
    pub now: DateTime<Tz>,
    pub horizon_days: u32,
}

impl ScheduleOptions {
    pub fn new(
        config: &HivecalConfig,
        apiary: Option<String>,
        horizon: Option<u32>,
        today: Option<&str>,
    ) -> Result<Self> {
        let tz = config.tz()?;
        let now = match today {
            Some(s) => noon_on(tz, s)?,
            None => Utc::now().with_timezone(&tz),
        };

        Ok(ScheduleOptions {
            scope: apiary.map(FeedScope::Apiary).unwrap_or(FeedScope::All),
            now,
            horizon_days: horizon.unwrap_or(config.horizon_days),
        })
    }

    pub fn request(self) -> FeedRequest<Tz> {
        FeedRequest {
            scope: self.scope,
            now: self.now,
            horizon_days: self.horizon_days,
        }
    }
}

/// Parse YYYY-MM-DD as midday in `tz`, clear of any DST transition at midnight.
fn noon_on(tz: Tz, s: &str) -> Result<DateTime<Tz>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", s))?;
    let noon = date
        .and_hms_opt(12, 0, 0)
        .with_context(|| format!("Invalid date '{}'", s))?;

    tz.from_local_datetime(&noon)
        .earliest()
        .with_context(|| format!("{} does not exist in {}", noon, tz))
}
