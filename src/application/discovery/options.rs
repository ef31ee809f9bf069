//! Discovery options

use std::path::PathBuf;

use crate::config::Config;
use crate::domain::services::{AppComposer, PatternMatcher};
use crate::infrastructure::fs::ExampleScanner;

#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Examples root holding the category directories
    pub root: PathBuf,
    /// Category directory names; empty means auto-detect `NN_*`
    pub categories: Vec<String>,
    /// Mount at `/{example}/{worker_type}` instead of `/{category}/{example}/{worker_type}`
    pub flatten: bool,
    pub module_extension: String,
    pub entry_module: String,
}

impl DiscoveryOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            categories: Vec::new(),
            flatten: false,
            module_extension: "toml".to_string(),
            entry_module: "mod".to_string(),
        }
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            root: root.into(),
            categories: config.discovery.categories.clone(),
            flatten: config.discovery.flatten,
            module_extension: config.discovery.module_extension.clone(),
            entry_module: config.discovery.entry_module.clone(),
        }
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    pub fn with_module_extension(mut self, ext: impl Into<String>) -> Self {
        self.module_extension = ext.into();
        self
    }

    pub(crate) fn matcher(&self) -> PatternMatcher {
        PatternMatcher::new(&self.module_extension, &self.entry_module)
    }

    pub(crate) fn scanner(&self) -> ExampleScanner {
        ExampleScanner::new(
            self.root.clone(),
            self.categories.clone(),
            self.matcher().entry_file(),
        )
    }

    pub(crate) fn composer(&self) -> AppComposer {
        AppComposer::new(self.flatten)
    }
}
