//! Route extractor
//!
//! Looks up the `{worker_type}_router` export of a loaded module and turns its
//! declared routes into validated descriptors. Only structure is checked:
//! the verb must be standard and the path well-formed.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::entities::{path_problem, LoadedModule, RouteDescriptor, WorkerCandidate};
use crate::domain::value_objects::{DiscoveryIssue, HttpMethod};

/// Routes pulled from one candidate's router export
#[derive(Debug, Clone)]
pub struct ExtractedRouter {
    pub candidate: WorkerCandidate,
    pub routes: Vec<RouteDescriptor>,
}

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub router: Option<ExtractedRouter>,
    pub issues: Vec<DiscoveryIssue>,
}

pub struct RouteExtractor;

impl RouteExtractor {
    /// Extract from a loaded module. A failed import yields nothing; its issue
    /// was already raised by the loader.
    pub fn extract(module: &LoadedModule) -> Extraction {
        let Some(exports) = module.module() else {
            return Extraction::default();
        };
        let candidate = &module.candidate;
        let expected = candidate.worker_type.router_attribute();

        let Some(collection) = exports.get(&expected) else {
            return Extraction {
                router: None,
                issues: vec![DiscoveryIssue::MissingRouter {
                    example: candidate.example.id(),
                    expected,
                    path: candidate.module_path.clone(),
                    available: exports.names().into_iter().map(String::from).collect(),
                }],
            };
        };

        let mut issues = Vec::new();
        let mut seen: HashSet<(HttpMethod, String)> = HashSet::new();
        let mut routes = Vec::new();

        for declared in collection.routes() {
            let method = match declared.method.parse::<HttpMethod>() {
                Ok(m) => m,
                Err(e) => {
                    issues.push(invalid(candidate, &declared.method, &declared.path, e.to_string()));
                    continue;
                }
            };
            if let Some(problem) = path_problem(&declared.path) {
                issues.push(invalid(candidate, &declared.method, &declared.path, problem.to_string()));
                continue;
            }
            if !seen.insert((method, declared.path.clone())) {
                issues.push(DiscoveryIssue::DuplicateRoute {
                    example: candidate.example.id(),
                    worker_type: candidate.worker_type.to_string(),
                    method: method.to_string(),
                    path: declared.path,
                });
                continue;
            }
            routes.push(RouteDescriptor {
                method,
                path: declared.path,
                handler: declared.handler,
                tags: declared.tags,
            });
        }

        debug!(
            "{}: extracted {} route(s) from '{}'",
            candidate.example,
            routes.len(),
            expected
        );

        Extraction {
            router: Some(ExtractedRouter {
                candidate: candidate.clone(),
                routes,
            }),
            issues,
        }
    }
}

fn invalid(candidate: &WorkerCandidate, method: &str, path: &str, reason: String) -> DiscoveryIssue {
    DiscoveryIssue::InvalidRoute {
        example: candidate.example.id(),
        worker_type: candidate.worker_type.to_string(),
        method: method.to_string(),
        path: path.to_string(),
        reason,
    }
}
