//! Sync-deps Use Case
//!
//! 1. Enumerate example directories
//! 2. Read each example manifest (unreadable ones are warnings)
//! 3. Consolidate; conflicts are reported, never resolved
//! 4. Merge into the root manifest and write, diff or check it. Writes
//!    re-read the root manifest under its lock.

use std::fs;
use std::path::PathBuf;

use similar::TextDiff;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::ports::{ManifestError, ManifestRepository};
use crate::domain::services::{DependencyConsolidator, DEFAULT_ESSENTIAL, DEFAULT_TRANSITIVE};
use crate::error::HubResult;
use crate::infrastructure::fs::ExampleScanner;

use super::result::{SyncDepsResult, SyncMode};

#[derive(Debug, Clone)]
pub struct SyncDepsOptions {
    /// Examples root holding the category directories
    pub root: PathBuf,
    pub categories: Vec<String>,
    /// Root manifest; relative paths resolve against `root`
    pub root_manifest: PathBuf,
    pub transitive: Vec<String>,
    pub essential: Vec<String>,
}

impl SyncDepsOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            categories: Vec::new(),
            root_manifest: PathBuf::from("pyproject.toml"),
            transitive: DEFAULT_TRANSITIVE.iter().map(|s| s.to_string()).collect(),
            essential: DEFAULT_ESSENTIAL.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            root: root.into(),
            categories: config.discovery.categories.clone(),
            root_manifest: PathBuf::from(&config.dependencies.root_manifest),
            transitive: config.dependencies.transitive.clone(),
            essential: config.dependencies.essential.clone(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.root_manifest)
    }
}

pub struct SyncDepsUseCase<MR>
where
    MR: ManifestRepository,
{
    repo: MR,
}

impl<MR> SyncDepsUseCase<MR>
where
    MR: ManifestRepository,
{
    pub fn new(repo: MR) -> Self {
        Self { repo }
    }

    pub fn execute(&self, options: &SyncDepsOptions, mode: SyncMode) -> HubResult<SyncDepsResult> {
        let scanner = ExampleScanner::new(&options.root, options.categories.clone(), String::new());
        let (examples, issues) = scanner.examples()?;

        let mut result = SyncDepsResult {
            mode,
            examples_scanned: examples.len(),
            warnings: issues.iter().map(ToString::to_string).collect(),
            ..SyncDepsResult::default()
        };

        let mut entries = Vec::new();
        for example in &examples {
            match self.repo.load_example(example) {
                Ok(Some(declared)) => {
                    result.manifests_read += 1;
                    entries.extend(declared);
                }
                Ok(None) => debug!("{}: no dependency manifest", example),
                Err(e) => {
                    warn!("{}", e);
                    result.warnings.push(e.to_string());
                }
            }
        }

        let consolidator = DependencyConsolidator::new(&options.transitive, &options.essential);
        let consolidated = consolidator.consolidate(&entries);
        result.packages = consolidated.len();
        info!(
            "{} package(s) from {} example manifest(s)",
            result.packages, result.manifests_read
        );

        let path = options.manifest_path();
        let (current, merged) = if mode == SyncMode::Write {
            let update = self
                .repo
                .update_root(&path, |current| consolidator.merge_into_root(&consolidated, current))?;
            result.written = update.written;
            if update.written {
                info!("updated {}", path.display());
            }
            (update.before, update.after)
        } else {
            // Read-only modes compare against a snapshot taken without the lock
            let current = self.repo.load_root(&path)?;
            let merged = consolidator.merge_into_root(&consolidated, &current);
            (current, merged)
        };

        result.changed = merged != current;
        result.dependencies = merged.dependencies.clone();
        result.conflicts = merged.conflicts.clone();

        match mode {
            SyncMode::DryRun if result.changed => {
                let before = fs::read_to_string(&path).map_err(|e| ManifestError::Access {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                let after = self.repo.render_root(&path, &merged)?;
                let name = options.root_manifest.display().to_string();
                result.diff = Some(
                    TextDiff::from_lines(&before, &after)
                        .unified_diff()
                        .header(&format!("a/{name}"), &format!("b/{name}"))
                        .to_string(),
                );
            }
            _ => {}
        }

        Ok(result)
    }
}
