//! Global hivecal configuration.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HORIZON_DAYS, DEFAULT_SERVER_PORT};
use crate::error::{HivecalError, HivecalResult};
use crate::feed::check_horizon;

static DEFAULT_APIARY_DIR: &str = "~/hivecal/apiaries";

fn default_apiary_dir() -> PathBuf {
    PathBuf::from(DEFAULT_APIARY_DIR)
}

fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

fn default_port() -> u16 {
    DEFAULT_SERVER_PORT
}

/// Configuration at ~/.config/hivecal/config.toml, overridable with
/// `HIVECAL_*` environment variables (e.g. `HIVECAL_HORIZON_DAYS=28`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HivecalConfig {
    /// Directory holding one `<slug>.toml` file per apiary.
    #[serde(default = "default_apiary_dir")]
    pub apiary_dir: PathBuf,

    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,

    /// IANA timezone that decides what "today" is. Defaults to the system zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for HivecalConfig {
    fn default() -> Self {
        HivecalConfig {
            apiary_dir: default_apiary_dir(),
            horizon_days: DEFAULT_HORIZON_DAYS,
            timezone: None,
            port: DEFAULT_SERVER_PORT,
        }
    }
}

impl HivecalConfig {
    pub fn config_path() -> HivecalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HivecalError::Config("Could not determine config directory".into()))?
            .join("hivecal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first if none exists.
    pub fn load() -> HivecalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> HivecalResult<Self> {
        let config: HivecalConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("HIVECAL").try_parsing(true))
            .build()
            .map_err(|e| HivecalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| HivecalError::Config(e.to_string()))?;

        check_horizon(config.horizon_days)
            .map_err(|e| HivecalError::Config(format!("horizon_days: {e}")))?;

        Ok(config)
    }

    /// Create a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> HivecalResult<()> {
        let contents = format!(
            "\
# hivecal configuration

# Where apiary files (<slug>.toml) live:
# apiary_dir = \"{}\"

# How many days ahead feeds reach:
# horizon_days = {}

# Timezone used to decide what \"today\" is (defaults to the system timezone):
# timezone = \"Europe/Berlin\"

# Port for hivecal-server:
# port = {}
",
            DEFAULT_APIARY_DIR, DEFAULT_HORIZON_DAYS, DEFAULT_SERVER_PORT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                HivecalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| HivecalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Apiary directory with `~` expanded.
    pub fn apiary_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.apiary_dir.to_string_lossy()).into_owned();
        PathBuf::from(expanded)
    }

    /// The reference timezone: configured zone, else the system zone, else UTC.
    pub fn tz(&self) -> HivecalResult<Tz> {
        if let Some(name) = &self.timezone {
            return name
                .parse::<Tz>()
                .map_err(|_| HivecalError::Config(format!("Unknown timezone '{}'", name)));
        }

        Ok(iana_time_zone::get_timezone()
            .ok()
            .and_then(|name| name.parse::<Tz>().ok())
            .unwrap_or(Tz::UTC))
    }

    /// `now` expressed in the reference timezone.
    pub fn localize(&self, now: DateTime<Utc>) -> HivecalResult<DateTime<Tz>> {
        Ok(now.with_timezone(&self.tz()?))
    }

    pub fn today(&self, now: DateTime<Utc>) -> HivecalResult<NaiveDate> {
        Ok(self.localize(now)?.date_naive())
    }
}
