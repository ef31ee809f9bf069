//! App composer
//!
//! Mounts extracted routers under deterministic prefixes and produces the
//! immutable `RouteTable`. Failures are confined to the examples involved:
//! - an example declaring a reserved path is not mounted at all
//! - every claimant of a duplicated prefix is dropped
//!
//! Everything else mounts.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::domain::entities::{
    ExampleLocation, MountedRoute, MountedRouter, RouteTable, RESERVED_PATHS,
};
use crate::domain::value_objects::{doc_tag, DiscoveryIssue, MountedPrefix};

use super::route_extractor::ExtractedRouter;

#[derive(Debug, Clone, Default)]
pub struct ComposeOutcome {
    pub table: RouteTable,
    pub issues: Vec<DiscoveryIssue>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppComposer {
    flatten: bool,
}

impl AppComposer {
    pub fn new(flatten: bool) -> Self {
        Self { flatten }
    }

    pub fn flatten(&self) -> bool {
        self.flatten
    }

    pub fn compose(&self, routers: Vec<ExtractedRouter>) -> ComposeOutcome {
        let mut issues = Vec::new();

        let mut rejected: BTreeSet<ExampleLocation> = BTreeSet::new();
        for router in &routers {
            for route in &router.routes {
                if is_reserved(&route.path) {
                    issues.push(DiscoveryIssue::ReservedPathViolation {
                        example: router.candidate.example.id(),
                        worker_type: router.candidate.worker_type.to_string(),
                        path: route.path.clone(),
                    });
                    rejected.insert(router.candidate.example.clone());
                }
            }
        }

        let mut by_prefix: BTreeMap<String, Vec<(MountedPrefix, ExtractedRouter)>> =
            BTreeMap::new();
        for router in routers {
            if rejected.contains(&router.candidate.example) {
                continue;
            }
            if router.routes.is_empty() {
                debug!(
                    "{}/{}: router declares no routes, not mounted",
                    router.candidate.example, router.candidate.worker_type
                );
                continue;
            }
            let prefix = MountedPrefix::compute(
                &router.candidate.example,
                &router.candidate.worker_type,
                self.flatten,
            );
            by_prefix
                .entry(prefix.prefix.clone())
                .or_default()
                .push((prefix, router));
        }

        let mut mounts = Vec::new();
        for (prefix, mut claimants) in by_prefix {
            if claimants.len() > 1 {
                let mut examples: Vec<_> = claimants
                    .iter()
                    .map(|(_, r)| r.candidate.example.directory.clone())
                    .collect();
                examples.sort();
                issues.push(DiscoveryIssue::PrefixCollision { prefix, examples });
                continue;
            }
            if let Some((prefix, router)) = claimants.pop() {
                mounts.push(mount(prefix, router));
            }
        }

        ComposeOutcome {
            table: RouteTable::new(mounts),
            issues,
        }
    }
}

fn mount(prefix: MountedPrefix, router: ExtractedRouter) -> MountedRouter {
    let tag = doc_tag(&router.candidate.example);
    let routes = router
        .routes
        .into_iter()
        .map(|route| {
            let mut tags = route.tags;
            tags.insert(tag.clone());
            MountedRoute {
                method: route.method,
                path: prefix.join(&route.path),
                declared_path: route.path,
                handler: route.handler,
                tags,
            }
        })
        .collect();
    MountedRouter {
        prefix,
        tag,
        routes,
    }
}

/// `/ping` and `/execute`, with or without a trailing slash
fn is_reserved(path: &str) -> bool {
    let trimmed = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };
    RESERVED_PATHS.contains(&trimmed)
}
