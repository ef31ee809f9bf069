//! Configuration module for workerhub
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (WORKERHUB_*)
//! 3. Examples root config (`workerhub.toml`)
//! 4. User config (~/.config/workerhub/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{ConfigError, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{Config, DependenciesConfig, DiscoveryConfig, LogConfig, WatchConfig};
