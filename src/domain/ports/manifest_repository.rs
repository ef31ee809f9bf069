//! ManifestRepository port
//!
//! Reads per-example dependency declarations and persists the root manifest.

use std::path::{Path, PathBuf};

use crate::domain::entities::{DependencyEntry, ExampleLocation};

pub trait ManifestRepository {
    /// Dependencies declared by one example, `Ok(None)` when it has no manifest
    fn load_example(
        &self,
        example: &ExampleLocation,
    ) -> Result<Option<Vec<DependencyEntry>>, ManifestError>;

    /// Current root dependency list and conflict table, in file order
    fn load_root(&self, path: &Path) -> Result<RootManifest, ManifestError>;

    /// Replace the root dependency list and conflict table
    fn save_root(&self, path: &Path, manifest: &RootManifest) -> Result<(), ManifestError>;

    /// Render what `save_root` would write, without writing
    fn render_root(&self, path: &Path, manifest: &RootManifest) -> Result<String, ManifestError>;

    /// Read, transform and write the root manifest while holding the write
    /// lock. Nothing is written when `update` returns the current contents.
    fn update_root<F>(&self, path: &Path, update: F) -> Result<RootUpdate, ManifestError>
    where
        F: FnOnce(&RootManifest) -> RootManifest;
}

/// Outcome of [`ManifestRepository::update_root`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootUpdate {
    pub before: RootManifest,
    pub after: RootManifest,
    pub written: bool,
}

/// Root manifest contents owned by consolidation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootManifest {
    pub dependencies: Vec<String>,
    pub conflicts: Vec<ConflictRecord>,
}

/// One unresolved conflict, recorded for a human to reconcile
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ConflictRecord {
    pub package: String,
    pub constraints: Vec<String>,
    pub examples: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("cannot read manifest {path}: {message}")]
    Access { path: PathBuf, message: String },

    #[error("invalid manifest {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("root manifest not found: {path}")]
    RootMissing { path: PathBuf },

    #[error("failed to write manifest {path}: {message}")]
    Write { path: PathBuf, message: String },
}
