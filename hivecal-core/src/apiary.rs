//! Apiaries and the hive data source behind the feeds.
//!
//! An apiary is stored as `<apiary_dir>/<slug>.toml`:
//!
//! ```toml
//! name = "Home yard"
//!
//! [[hives]]
//! id = "h1"
//! name = "Queen Bee"
//! status = "active"
//! inspection_frequency_days = 7
//! last_inspection_date = "2024-01-10"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{HivecalError, HivecalResult};
use crate::hive::HiveState;

/// A named group of hives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apiary {
    #[serde(skip)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub hives: Vec<HiveState>,
}

/// Supplies hive states to the feed pipeline.
///
/// Implementations are responsible for scoping data to what the requester may see.
pub trait HiveSource {
    /// All apiaries, sorted by slug.
    fn apiaries(&self) -> HivecalResult<Vec<Apiary>>;

    /// A single apiary. Fails with `ApiaryNotFound` if there is no such slug.
    fn apiary(&self, slug: &str) -> HivecalResult<Apiary>;
}

/// Apiary files in a directory.
#[derive(Debug, Clone)]
pub struct ApiaryDir {
    path: PathBuf,
}

impl ApiaryDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ApiaryDir { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_file(slug: &str, path: &Path) -> HivecalResult<Apiary> {
        let content = std::fs::read_to_string(path)?;
        let mut apiary: Apiary = toml::from_str(&content).map_err(|e| HivecalError::ApiarySource {
            slug: slug.to_string(),
            reason: e.to_string(),
        })?;
        apiary.slug = slug.to_string();
        Ok(apiary)
    }
}

impl HiveSource for ApiaryDir {
    fn apiaries(&self) -> HivecalResult<Vec<Apiary>> {
        let Ok(entries) = std::fs::read_dir(&self.path) else {
            return Ok(Vec::new());
        };

        let mut apiaries: Vec<Apiary> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
            .filter_map(|path| {
                let slug = path.file_stem()?.to_str()?.to_string();
                match Self::load_file(&slug, &path) {
                    Ok(apiary) => Some(apiary),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "skipping unreadable apiary file");
                        None
                    }
                }
            })
            .collect();

        apiaries.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(apiaries)
    }

    fn apiary(&self, slug: &str) -> HivecalResult<Apiary> {
        if !is_valid_slug(slug) {
            return Err(HivecalError::ApiaryNotFound(slug.to_string()));
        }

        let path = self.path.join(format!("{}.toml", slug));
        if !path.is_file() {
            return Err(HivecalError::ApiaryNotFound(slug.to_string()));
        }

        Self::load_file(slug, &path)
    }
}

/// Slugs name files directly under the apiary directory, nothing else.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && slug
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
        && !slug.contains("..")
}
