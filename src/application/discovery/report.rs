//! Discovery report

use serde::Serialize;

use crate::domain::entities::RouteTable;
use crate::domain::value_objects::{DiscoveryIssue, IssueKind, Severity};

/// What one discovery pass found, mounted and skipped
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryReport {
    pub examples_scanned: usize,
    pub candidates: usize,
    /// Modules executed during this pass
    pub modules_loaded: usize,
    /// Modules reused from the reload cache
    pub modules_reused: usize,
    pub mounted_routers: usize,
    pub routes: usize,
    pub issues: Vec<DiscoveryIssue>,
}

impl DiscoveryReport {
    pub fn warnings(&self) -> impl Iterator<Item = &DiscoveryIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning)
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    pub fn issues_of(&self, kind: IssueKind) -> Vec<&DiscoveryIssue> {
        self.issues.iter().filter(|i| i.kind() == kind).collect()
    }
}

/// Output of a discovery pass: the snapshot plus its report
#[derive(Debug, Clone)]
pub struct Composition {
    pub table: RouteTable,
    pub report: DiscoveryReport,
}
