use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::filters::HostFilters;
use crate::domain::models::CatalogEntry;
use crate::domain::rank::{rank_scored, Ranked};
use crate::domain::score::score;
use crate::storage::catalog::CatalogStore;
use crate::storage::config::RuntimeConfig;

/// Search-box session: a filtered catalog, the current query and the ranked
/// results for it. Every query change re-ranks from scratch.
pub struct Launcher {
    entries: Vec<CatalogEntry>,
    query: String,
    results: Vec<Ranked<CatalogEntry>>,
    selected_index: usize,
    limit: usize,
}

impl Launcher {
    pub fn new(entries: Vec<CatalogEntry>, filters: &HostFilters, limit: usize) -> Self {
        let mut launcher = Self {
            entries: filters.apply(entries),
            query: String::new(),
            results: Vec::new(),
            selected_index: 0,
            limit,
        };
        launcher.refresh();
        launcher
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn results(&self) -> &[Ranked<CatalogEntry>] {
        &self.results
    }

    /// The results that fit in the visible list.
    pub fn visible_results(&self) -> &[Ranked<CatalogEntry>] {
        let end = self.results.len().min(self.limit);
        &self.results[..end]
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&CatalogEntry> {
        self.visible_results()
            .get(self.selected_index)
            .map(|ranked| &ranked.item)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refresh();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refresh();
    }

    pub fn backspace(&mut self) {
        if self.query.pop().is_some() {
            self.refresh();
        }
    }

    pub fn select_next(&mut self) {
        let len = self.visible_results().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    pub fn select_previous(&mut self) {
        let len = self.visible_results().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    fn refresh(&mut self) {
        self.results = rank_scored(&self.entries, &self.query);
        self.selected_index = 0;
        debug!(query = %self.query, results = self.results.len(), "query updated");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Rank {
        query: String,
        limit: Option<usize>,
        all: bool,
        json: bool,
    },
    Score {
        target: String,
        query: String,
        aliases: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub action: Action,
}

pub fn run(options: RunOptions) -> Result<()> {
    init_tracing(options.debug);

    let config = match &options.config {
        Some(path) => RuntimeConfig::load_from_path(path),
        None => RuntimeConfig::load(),
    }
    .context("load runtime config")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&options, &config, &mut out)
}

/// Runs one action against an already loaded config, writing results to `out`.
pub fn execute(options: &RunOptions, config: &RuntimeConfig, out: &mut impl Write) -> Result<()> {
    match &options.action {
        Action::Score {
            target,
            query,
            aliases,
        } => {
            let value = score(target, query, aliases);
            writeln!(out, "{value}").context("write score")?;
        }
        Action::Rank {
            query,
            limit,
            all,
            json,
        } => {
            let catalog_path = options
                .catalog
                .clone()
                .unwrap_or_else(|| config.catalog.path.clone());
            let store = CatalogStore::new(&catalog_path);
            let entries = store.load().context("load catalog")?;
            info!(
                path = %catalog_path.display(),
                entries = entries.len(),
                "loaded catalog"
            );

            let limit = if *all {
                usize::MAX
            } else {
                limit.unwrap_or(config.results.limit)
            };
            let mut launcher = Launcher::new(entries, &config.filters.to_host_filters(), limit);
            launcher.set_query(query.as_str());

            write_results(out, launcher.visible_results(), *json)?;
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct ResultRow<'a> {
    name: &'a str,
    path: Option<&'a std::path::Path>,
    score: f64,
}

fn write_results(out: &mut impl Write, results: &[Ranked<CatalogEntry>], json: bool) -> Result<()> {
    if json {
        let rows: Vec<ResultRow<'_>> = results
            .iter()
            .map(|ranked| ResultRow {
                name: &ranked.item.name,
                path: ranked.item.path.as_deref(),
                score: ranked.score,
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &rows).context("serialize results")?;
        writeln!(out).context("write results")?;
        return Ok(());
    }

    for ranked in results {
        writeln!(out, "{:.4}\t{}", ranked.score, ranked.item.name).context("write results")?;
    }
    Ok(())
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "launchscore=debug"
    } else {
        "launchscore=info"
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .try_init();
}
