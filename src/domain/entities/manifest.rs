//! Dependency manifest entities

use std::collections::{BTreeMap, BTreeSet};

use super::ExampleLocation;

/// One dependency declared by one example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    /// Normalised package name (grouping key)
    pub package_name: String,
    /// Constraint text following the name, whitespace-normalised
    pub version_constraint: String,
    /// Requirement exactly as written in the example manifest
    pub requirement: String,
    pub source_example: ExampleLocation,
}

/// Merged view of every declaration of one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedEntry {
    pub package_name: String,
    /// Set only when every contributor wrote the same constraint
    pub chosen_constraint: Option<String>,
    /// Every distinct constraint, sorted
    pub constraints: BTreeSet<String>,
    /// Contributing examples, sorted and deduplicated
    pub contributing_examples: Vec<ExampleLocation>,
    pub conflict: bool,
}

impl ConsolidatedEntry {
    /// Requirement lines for the root manifest.
    ///
    /// A conflicted package yields one line per distinct constraint so the
    /// installer, not this tool, reports the incompatibility.
    pub fn requirements(&self) -> Vec<String> {
        self.constraints
            .iter()
            .map(|c| format!("{}{}", self.package_name, c))
            .collect()
    }
}

/// Consolidation output, keyed and ordered by package name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidatedManifest {
    pub entries: BTreeMap<String, ConsolidatedEntry>,
}

impl ConsolidatedManifest {
    pub fn get(&self, package: &str) -> Option<&ConsolidatedEntry> {
        self.entries.get(package)
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &ConsolidatedEntry> {
        self.entries.values().filter(|e| e.conflict)
    }

    pub fn has_conflicts(&self) -> bool {
        self.conflicts().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
