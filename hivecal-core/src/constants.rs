/// Cadence used when a hive has no usable inspection frequency.
pub const DEFAULT_FREQUENCY_DAYS: i64 = 7;

/// How far ahead (in days) feeds are generated unless configured otherwise.
pub const DEFAULT_HORIZON_DAYS: u32 = 42;

/// Upper bound on the horizon. Work and feed size grow linearly with it.
pub const MAX_HORIZON_DAYS: u32 = 730;

/// PRODID of every generated feed. Calendar clients key compatibility quirks on it,
/// so it must stay stable across releases.
pub const PRODID: &str = "-//Hivecal//Inspection Schedule//EN";

/// Appended to occurrence uids to make them unique across feeds.
pub const UID_DOMAIN: &str = "hivecal";

pub const DEFAULT_SERVER_PORT: u16 = 4097;
