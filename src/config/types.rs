//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::application::watch::DEBOUNCE_MS;
use crate::domain::services::{DEFAULT_ESSENTIAL, DEFAULT_TRANSITIVE};

use super::loader::{self, ConfigError, ConfigWarning};

/// Where and how examples are discovered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Category directories to scan, in order. Empty means every `NN_*`
    /// directory under the examples root.
    #[serde(default)]
    pub categories: Vec<String>,

    /// Mount at `/{category}/{example}` instead of
    /// `/{category}/{example}/{worker_type}`
    #[serde(default)]
    pub flatten: bool,

    #[serde(default = "default_module_extension")]
    pub module_extension: String,

    /// Entry module name inside `workers/{worker_type}/`
    #[serde(default = "default_entry_module")]
    pub entry_module: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            flatten: false,
            module_extension: default_module_extension(),
            entry_module: default_entry_module(),
        }
    }
}

fn default_module_extension() -> String {
    "toml".to_string()
}

fn default_entry_module() -> String {
    "mod".to_string()
}

/// Dependency consolidation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependenciesConfig {
    /// Per-example manifest file name
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,

    /// Root manifest, relative to the examples root
    #[serde(default = "default_manifest_file")]
    pub root_manifest: String,

    /// Packages already provided by the runtime; never consolidated
    #[serde(default = "default_transitive")]
    pub transitive: Vec<String>,

    /// Root dependencies that are always kept
    #[serde(default = "default_essential")]
    pub essential: Vec<String>,
}

impl Default for DependenciesConfig {
    fn default() -> Self {
        Self {
            manifest_file: default_manifest_file(),
            root_manifest: default_manifest_file(),
            transitive: default_transitive(),
            essential: default_essential(),
        }
    }
}

fn default_manifest_file() -> String {
    "pyproject.toml".to_string()
}

fn default_transitive() -> Vec<String> {
    DEFAULT_TRANSITIVE.iter().map(|s| s.to_string()).collect()
}

fn default_essential() -> Vec<String> {
    DEFAULT_ESSENTIAL.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    DEBOUNCE_MS
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `"workerhub=debug"`
    #[serde(default)]
    pub filter: Option<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub dependencies: DependenciesConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }

    /// Load from the examples root, user config, or defaults.
    ///
    /// The file that was used (if any) and its warnings are returned
    /// alongside. A config file that fails to parse is an error.
    pub fn discover(
        examples_root: &Path,
    ) -> Result<(Self, Option<std::path::PathBuf>, Vec<ConfigWarning>), ConfigError> {
        loader::discover(examples_root)
    }

    /// Apply environment variable overrides (WORKERHUB_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
