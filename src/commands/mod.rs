//! Command implementations

use std::path::PathBuf;

use workerhub::config::Config;
use workerhub::{DiscoveryOptions, DiscoveryUseCase, TomlModuleLoader};

pub mod call;
pub mod routes;
pub mod sync_deps;
pub mod watch;

/// Resolved settings shared by every command
pub struct Context {
    pub root: PathBuf,
    pub config: Config,
    pub json: bool,
}

impl Context {
    pub fn discovery(&self) -> DiscoveryUseCase<TomlModuleLoader> {
        DiscoveryUseCase::new(
            DiscoveryOptions::from_config(&self.root, &self.config),
            TomlModuleLoader::new(),
        )
    }
}
