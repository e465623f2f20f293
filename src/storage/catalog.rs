use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::models::CatalogEntry;

#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Result<Vec<CatalogEntry>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "catalog file missing, starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read catalog file: {}", self.path.display()))?;

        let entries = parse_catalog(&content)
            .with_context(|| format!("failed to parse catalog file: {}", self.path.display()))?;

        Ok(drop_unnamed(entries))
    }

    pub fn save(&self, entries: &[CatalogEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create catalog directory: {}", parent.display())
            })?;
        }

        let body = serde_json::to_string_pretty(entries).context("failed to serialize catalog")?;
        fs::write(&self.path, body)
            .with_context(|| format!("failed to write catalog file: {}", self.path.display()))?;

        Ok(())
    }
}

// A catalog is either a plain entry array or the launcher's app cache, which
// stores that array as a JSON string inside an object: {"apps": "[...]"}.
fn parse_catalog(content: &str) -> Result<Vec<CatalogEntry>> {
    let value: Value = serde_json::from_str(content).context("invalid JSON")?;
    if value.is_object() {
        return parse_app_cache(value);
    }
    serde_json::from_value(value).context("invalid catalog entry list")
}

fn parse_app_cache(value: Value) -> Result<Vec<CatalogEntry>> {
    #[derive(serde::Deserialize)]
    struct AppCache {
        apps: String,
    }

    let cache: AppCache = serde_json::from_value(value).context("invalid app cache object")?;
    serde_json::from_str(&cache.apps).context("invalid app list in cache")
}

fn drop_unnamed(entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    entries
        .into_iter()
        .filter(|entry| {
            if entry.name.trim().is_empty() {
                warn!(path = ?entry.path, "skipping catalog entry without a name");
                false
            } else {
                true
            }
        })
        .collect()
}
