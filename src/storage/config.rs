use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::domain::filters::{HostFilters, DEFAULT_EXCLUDED_PREFIXES};

const DEFAULT_RESULT_LIMIT: usize = 5;
const CONFIG_DIR: &str = ".config/launchscore";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub dedupe: bool,
    pub exclude_prefixes: Vec<String>,
}

impl FilterConfig {
    pub fn to_host_filters(&self) -> HostFilters {
        HostFilters {
            dedupe: self.dedupe,
            exclude_prefixes: self.exclude_prefixes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsConfig {
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub catalog: CatalogConfig,
    pub filters: FilterConfig,
    pub results: ResultsConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                path: config_home().join("catalog.json"),
            },
            filters: FilterConfig {
                dedupe: true,
                exclude_prefixes: DEFAULT_EXCLUDED_PREFIXES
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            },
            results: ResultsConfig {
                limit: DEFAULT_RESULT_LIMIT,
            },
        }
    }
}

impl RuntimeConfig {
    pub fn default_path() -> PathBuf {
        config_home().join("config.toml")
    }

    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge_file(path)?;
        config.merge_env()?;
        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed reading config file: {}", path.display()))?;
        self.merge_toml_text(&content)
            .with_context(|| format!("failed parsing config TOML: {}", path.display()))
    }

    fn merge_toml_text(&mut self, content: &str) -> Result<()> {
        let mut section = String::new();

        for (idx, raw_line) in content.lines().enumerate() {
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') {
                if !line.ends_with(']') {
                    return Err(anyhow!("line {}: invalid section syntax", idx + 1));
                }
                section = line[1..line.len() - 1].trim().to_string();
                continue;
            }

            let (key, value_raw) = line
                .split_once('=')
                .ok_or_else(|| anyhow!("line {}: expected key=value", idx + 1))?;
            let key = key.trim();
            let value = parse_value(value_raw.trim())
                .with_context(|| format!("line {}: invalid value", idx + 1))?;

            self.apply_file_value(&section, key, value)
                .with_context(|| format!("line {}: invalid {section}.{key}", idx + 1))?;
        }

        Ok(())
    }

    fn apply_file_value(&mut self, section: &str, key: &str, value: TomlValue) -> Result<()> {
        match (section, key) {
            ("catalog", "path") => {
                self.catalog.path = PathBuf::from(value.into_string()?);
            }
            ("filters", "dedupe") => {
                self.filters.dedupe = value.as_bool()?;
            }
            ("filters", "exclude_prefixes") => {
                self.filters.exclude_prefixes = split_prefixes(value.as_str()?);
            }
            ("results", "limit") => {
                self.results.limit = value.as_usize()?;
            }
            _ => {}
        }

        Ok(())
    }

    fn merge_env(&mut self) -> Result<()> {
        if let Ok(path) = env::var("LAUNCHSCORE_CATALOG_PATH") {
            self.catalog.path = PathBuf::from(path);
        }
        if let Ok(dedupe) = env::var("LAUNCHSCORE_DEDUPE") {
            self.filters.dedupe =
                parse_bool(&dedupe).with_context(|| "invalid LAUNCHSCORE_DEDUPE".to_string())?;
        }
        if let Ok(prefixes) = env::var("LAUNCHSCORE_EXCLUDE_PREFIXES") {
            self.filters.exclude_prefixes = split_prefixes(&prefixes);
        }
        if let Ok(limit) = env::var("LAUNCHSCORE_RESULT_LIMIT") {
            self.results.limit = limit
                .parse::<usize>()
                .with_context(|| "invalid LAUNCHSCORE_RESULT_LIMIT".to_string())?;
        }

        Ok(())
    }
}

fn config_home() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_DIR)
}

fn split_prefixes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|prefix| !prefix.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("invalid boolean '{value}' (expected true or false)")),
    }
}

fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (idx, ch) in line.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..idx],
            _ => {}
        }
    }
    line
}

#[derive(Debug, Clone)]
enum TomlValue {
    String(String),
    Integer(u64),
    Boolean(bool),
}

impl TomlValue {
    fn as_str(&self) -> Result<&str> {
        match self {
            Self::String(value) => Ok(value.as_str()),
            _ => Err(anyhow!("expected string value")),
        }
    }

    fn into_string(self) -> Result<String> {
        match self {
            Self::String(value) => Ok(value),
            _ => Err(anyhow!("expected string value")),
        }
    }

    fn as_bool(&self) -> Result<bool> {
        match self {
            Self::Boolean(value) => Ok(*value),
            _ => Err(anyhow!("expected boolean value")),
        }
    }

    fn as_usize(&self) -> Result<usize> {
        match self {
            Self::Integer(value) => usize::try_from(*value)
                .map_err(|_| anyhow!("integer value is out of range for usize")),
            _ => Err(anyhow!("expected integer value")),
        }
    }
}

fn parse_value(value: &str) -> Result<TomlValue> {
    let trimmed = value.trim();
    if trimmed.starts_with('"') {
        if !trimmed.ends_with('"') || trimmed.len() < 2 {
            return Err(anyhow!("unterminated string"));
        }
        return Ok(TomlValue::String(trimmed[1..trimmed.len() - 1].to_string()));
    }

    match trimmed {
        "true" => return Ok(TomlValue::Boolean(true)),
        "false" => return Ok(TomlValue::Boolean(false)),
        _ => {}
    }

    if let Ok(number) = trimmed.parse::<u64>() {
        return Ok(TomlValue::Integer(number));
    }

    Ok(TomlValue::String(trimmed.to_string()))
}
