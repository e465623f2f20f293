use std::collections::HashSet;

use tracing::debug;

use crate::domain::models::CatalogEntry;

pub const DEFAULT_EXCLUDED_PREFIXES: [&str; 2] = ["/Library", "/System"];

/// Host-side filtering applied to the catalog before it is handed to the ranker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFilters {
    pub dedupe: bool,
    pub exclude_prefixes: Vec<String>,
}

impl Default for HostFilters {
    fn default() -> Self {
        Self {
            dedupe: true,
            exclude_prefixes: DEFAULT_EXCLUDED_PREFIXES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl HostFilters {
    pub fn none() -> Self {
        Self {
            dedupe: false,
            exclude_prefixes: Vec::new(),
        }
    }

    /// De-duplicates by name first, then drops excluded paths.
    pub fn apply(&self, entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
        let before = entries.len();
        let entries = if self.dedupe {
            dedupe_by_name(entries)
        } else {
            entries
        };
        let entries = exclude_path_prefixes(entries, &self.exclude_prefixes);
        debug!(before, after = entries.len(), "applied host filters");
        entries
    }
}

/// Keeps the first entry for every name, preserving order.
pub fn dedupe_by_name(entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.name.clone()))
        .collect()
}

/// Drops entries whose path starts with one of `prefixes`. Entries without a
/// path are kept.
pub fn exclude_path_prefixes(entries: Vec<CatalogEntry>, prefixes: &[String]) -> Vec<CatalogEntry> {
    if prefixes.is_empty() {
        return entries;
    }

    entries
        .into_iter()
        .filter(|entry| match &entry.path {
            Some(path) => {
                let path = path.to_string_lossy();
                !prefixes
                    .iter()
                    .any(|prefix| !prefix.is_empty() && path.starts_with(prefix.as_str()))
            }
            None => true,
        })
        .collect()
}
