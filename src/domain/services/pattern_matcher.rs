//! Pattern matcher
//!
//! Decides which worker modules an example directory contains:
//! - single file: `{worker_type}_worker.{ext}`
//! - directory package: `workers/{worker_type}/{entry}.{ext}`
//!
//! Both patterns may coexist. A worker type found through both is a naming
//! conflict and neither candidate survives.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::entities::{DiscoveryPattern, ExampleListing, WorkerCandidate};
use crate::domain::value_objects::{DiscoveryIssue, WorkerType};

/// Name of the directory holding worker packages
pub const WORKERS_DIR: &str = "workers";

#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    pub candidates: Vec<WorkerCandidate>,
    pub issues: Vec<DiscoveryIssue>,
}

#[derive(Debug, Clone)]
pub struct PatternMatcher {
    module_extension: String,
    entry_module: String,
}

impl PatternMatcher {
    pub fn new(module_extension: impl Into<String>, entry_module: impl Into<String>) -> Self {
        Self {
            module_extension: module_extension.into(),
            entry_module: entry_module.into(),
        }
    }

    pub fn module_extension(&self) -> &str {
        &self.module_extension
    }

    /// Entry-point file name of a directory package
    pub fn entry_file(&self) -> String {
        format!("{}.{}", self.entry_module, self.module_extension)
    }

    fn worker_suffix(&self) -> String {
        format!("_worker.{}", self.module_extension)
    }

    pub fn match_listing(&self, listing: &ExampleListing) -> MatchOutcome {
        let location = &listing.location;
        let mut by_type: BTreeMap<WorkerType, Vec<WorkerCandidate>> = BTreeMap::new();

        let suffix = self.worker_suffix();
        for file in &listing.files {
            let Some(token) = file.strip_suffix(&suffix) else {
                continue;
            };
            let Some(worker_type) = WorkerType::parse(token) else {
                debug!("{}: '{}' is not a valid worker type token, skipping", location, file);
                continue;
            };
            by_type.entry(worker_type.clone()).or_default().push(WorkerCandidate {
                example: location.clone(),
                worker_type,
                module_path: location.directory.join(file),
                module_key: format!("{}/{}/{}", location.category, location.name, file),
                pattern: DiscoveryPattern::SingleFile,
            });
        }

        let entry_file = self.entry_file();
        for package in &listing.worker_packages {
            if package.dir_name.starts_with('_') || package.dir_name.starts_with('.') {
                continue;
            }
            if !package.has_entry {
                debug!(
                    "{}: {}/{} has no {}, skipping",
                    location, WORKERS_DIR, package.dir_name, entry_file
                );
                continue;
            }
            let Some(worker_type) = WorkerType::parse(&package.dir_name) else {
                debug!(
                    "{}: '{}' is not a valid worker type token, skipping",
                    location, package.dir_name
                );
                continue;
            };
            by_type.entry(worker_type.clone()).or_default().push(WorkerCandidate {
                example: location.clone(),
                worker_type,
                module_path: location
                    .directory
                    .join(WORKERS_DIR)
                    .join(&package.dir_name)
                    .join(&entry_file),
                module_key: format!(
                    "{}/{}/{}/{}/{}",
                    location.category, location.name, WORKERS_DIR, package.dir_name, entry_file
                ),
                pattern: DiscoveryPattern::DirectoryPackage,
            });
        }

        let mut outcome = MatchOutcome::default();
        for (worker_type, mut found) in by_type {
            if found.len() > 1 {
                found.sort_by(|a, b| a.pattern.cmp(&b.pattern));
                outcome.issues.push(DiscoveryIssue::NamingConflict {
                    example: location.id(),
                    worker_type: worker_type.to_string(),
                    paths: found.into_iter().map(|c| c.module_path).collect(),
                });
                continue;
            }
            outcome.candidates.extend(found);
        }

        if outcome.candidates.is_empty() && outcome.issues.is_empty() {
            outcome.issues.push(DiscoveryIssue::StructuralMismatch {
                example: location.id(),
                directory: location.directory.clone(),
            });
        }

        outcome
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new("toml", "mod")
    }
}
