//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::types::Config;

/// Config file looked up at the examples root
pub const PROJECT_CONFIG_FILE: &str = "workerhub.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Examples root config first, then the user config, then defaults
pub fn discover(
    examples_root: &Path,
) -> Result<(Config, Option<PathBuf>, Vec<ConfigWarning>), ConfigError> {
    let candidates = [
        Some(examples_root.join(PROJECT_CONFIG_FILE)),
        dirs::config_dir().map(|d| d.join("workerhub").join("config.toml")),
    ];

    for path in candidates.into_iter().flatten() {
        if path.is_file() {
            let (config, warnings) = load_with_warnings(&path)?;
            return Ok((config, Some(path), warnings));
        }
    }

    Ok((Config::default(), None, Vec::new()))
}

/// Apply environment variable overrides (WORKERHUB_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

pub(super) fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    // WORKERHUB_CATEGORIES (comma-separated)
    if let Some(categories) = var("WORKERHUB_CATEGORIES") {
        config.discovery.categories = categories
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }

    if let Some(val) = var("WORKERHUB_FLATTEN") {
        config.discovery.flatten = is_truthy(&val);
    }

    if let Some(ext) = var("WORKERHUB_MODULE_EXT") {
        let ext = ext.trim().trim_start_matches('.');
        if !ext.is_empty() {
            config.discovery.module_extension = ext.to_string();
        }
    }

    if let Some(ms) = var("WORKERHUB_DEBOUNCE_MS") {
        match ms.trim().parse() {
            Ok(ms) => config.watch.debounce_ms = ms,
            Err(_) => debug!("ignoring WORKERHUB_DEBOUNCE_MS={:?}", ms),
        }
    }

    if let Some(filter) = var("WORKERHUB_LOG") {
        config.log.filter = Some(filter);
    }

    config
}

fn is_truthy(val: &str) -> bool {
    matches!(
        val.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// 1-based line of the first `key =` assignment, falling back to any mention
fn find_line_number(content: &str, key: &str) -> Option<usize> {
    let assigns = |line: &str| {
        line.trim_start()
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='))
    };
    content
        .lines()
        .position(assigns)
        .or_else(|| content.lines().position(|line| line.contains(key)))
        .map(|i| i + 1)
}

/// Closest known key within an edit distance of 2
fn suggest_key(unknown: &str) -> Option<String> {
    const KNOWN_KEYS: &[&str] = &[
        "discovery",
        "categories",
        "flatten",
        "module_extension",
        "entry_module",
        "dependencies",
        "manifest_file",
        "root_manifest",
        "transitive",
        "essential",
        "watch",
        "debounce_ms",
        "log",
        "filter",
    ];

    KNOWN_KEYS
        .iter()
        .map(|known| (edit_distance(unknown, known), *known))
        .filter(|(distance, _)| *distance <= 2)
        .min()
        .map(|(_, known)| known.to_string())
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == *cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}
