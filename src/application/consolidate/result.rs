//! Sync-deps result types

use serde::Serialize;

use crate::domain::ports::ConflictRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Rewrite the root manifest when it differs
    #[default]
    Write,
    /// Show the unified diff, write nothing
    DryRun,
    /// Write nothing; out of sync is a failure
    Check,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncDepsResult {
    pub mode: SyncMode,
    pub examples_scanned: usize,
    pub manifests_read: usize,
    pub packages: usize,
    pub dependencies: Vec<String>,
    pub conflicts: Vec<ConflictRecord>,
    pub warnings: Vec<String>,
    /// Root manifest differs from the consolidated one
    pub changed: bool,
    pub written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl SyncDepsResult {
    /// `--check` fails when the root manifest is out of sync
    pub fn is_success(&self) -> bool {
        !(self.mode == SyncMode::Check && self.changed)
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}
