//! Dependency consolidator
//!
//! Merges every example's declared dependencies into one root list.
//! Conflicts are flagged and surfaced; no version is ever picked on behalf
//! of the examples.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::{debug, warn};

use crate::domain::entities::{ConsolidatedEntry, ConsolidatedManifest, DependencyEntry};
use crate::domain::ports::{ConflictRecord, RootManifest};

use super::manifest_parser::{normalize_name, Requirement};

/// Packages the hosting runtime already provides
pub const DEFAULT_TRANSITIVE: [&str; 3] = ["fastapi", "pydantic", "uvicorn"];

/// Root dependencies kept even when an example declares them too
pub const DEFAULT_ESSENTIAL: [&str; 1] = ["runpod-flash"];

#[derive(Debug, Clone)]
pub struct DependencyConsolidator {
    transitive: HashSet<String>,
    essential: HashSet<String>,
}

impl Default for DependencyConsolidator {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITIVE, DEFAULT_ESSENTIAL)
    }
}

impl DependencyConsolidator {
    pub fn new<T, E>(
        transitive: impl IntoIterator<Item = T>,
        essential: impl IntoIterator<Item = E>,
    ) -> Self
    where
        T: AsRef<str>,
        E: AsRef<str>,
    {
        Self {
            transitive: transitive
                .into_iter()
                .map(|n| normalize_name(n.as_ref()))
                .collect(),
            essential: essential
                .into_iter()
                .map(|n| normalize_name(n.as_ref()))
                .collect(),
        }
    }

    pub fn is_transitive(&self, package: &str) -> bool {
        self.transitive.contains(package)
    }

    /// Group entries by package name. Textually identical constraints merge;
    /// anything else is a conflict listing every contributor.
    pub fn consolidate(&self, entries: &[DependencyEntry]) -> ConsolidatedManifest {
        let mut grouped: BTreeMap<&str, Vec<&DependencyEntry>> = BTreeMap::new();
        for entry in entries {
            if self.is_transitive(&entry.package_name) {
                debug!(
                    "{}: '{}' is provided transitively, skipping",
                    entry.source_example, entry.package_name
                );
                continue;
            }
            grouped.entry(&entry.package_name).or_default().push(entry);
        }

        let mut manifest = ConsolidatedManifest::default();
        for (package, declared) in grouped {
            let constraints: BTreeSet<String> = declared
                .iter()
                .map(|e| e.version_constraint.clone())
                .collect();
            let mut contributing_examples: Vec<_> =
                declared.iter().map(|e| e.source_example.clone()).collect();
            contributing_examples.sort();
            contributing_examples.dedup();

            let conflict = constraints.len() > 1;
            let chosen_constraint = if conflict {
                let listed: Vec<String> = declared
                    .iter()
                    .map(|e| format!("{} ({})", e.requirement, e.source_example))
                    .collect();
                warn!(
                    "version conflict for '{}': {}",
                    package,
                    listed.join(", ")
                );
                None
            } else {
                constraints.iter().next().cloned()
            };

            manifest.entries.insert(
                package.to_string(),
                ConsolidatedEntry {
                    package_name: package.to_string(),
                    chosen_constraint,
                    constraints,
                    contributing_examples,
                    conflict,
                },
            );
        }
        manifest
    }

    /// Root manifest after consolidation.
    ///
    /// Root entries survive when essential or when no example declares them;
    /// every consolidated package follows. The list is sorted by name.
    pub fn merge_into_root(
        &self,
        consolidated: &ConsolidatedManifest,
        root: &RootManifest,
    ) -> RootManifest {
        let mut merged: Vec<(String, String)> = Vec::new();
        let mut added: HashSet<String> = HashSet::new();

        for dep in &root.dependencies {
            let name = root_name(dep);
            if added.contains(&name) {
                continue;
            }
            let keep = self.essential.contains(&name)
                || (consolidated.get(&name).is_none() && !self.is_transitive(&name));
            if keep {
                merged.push((name.clone(), dep.trim().to_string()));
                added.insert(name);
            }
        }

        for entry in consolidated.entries.values() {
            if added.contains(&entry.package_name) {
                continue;
            }
            for requirement in entry.requirements() {
                merged.push((entry.package_name.clone(), requirement));
            }
            added.insert(entry.package_name.clone());
        }

        merged.sort();

        let conflicts = consolidated
            .conflicts()
            .map(|e| ConflictRecord {
                package: e.package_name.clone(),
                constraints: e.requirements(),
                examples: e.contributing_examples.iter().map(|x| x.id()).collect(),
            })
            .collect();

        RootManifest {
            dependencies: merged.into_iter().map(|(_, dep)| dep).collect(),
            conflicts,
        }
    }
}

fn root_name(dep: &str) -> String {
    match Requirement::parse(dep) {
        Ok(req) => req.name,
        Err(_) => normalize_name(dep),
    }
}
