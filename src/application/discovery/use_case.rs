//! Discovery Use Case
//!
//! One pass over the examples tree:
//! 1. Scan category and example directories
//! 2. Match worker candidates by naming convention
//! 3. Load each candidate in isolation
//! 4. Extract the `{worker_type}_router` export
//! 5. Compose the route table
//!
//! Only an unreadable or missing root aborts the pass. Every other problem
//! becomes a `DiscoveryIssue` in the report and the rest of the tree mounts.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::domain::entities::LoadedModule;
use crate::domain::ports::ModuleLoader;
use crate::domain::services::RouteExtractor;
use crate::domain::value_objects::DiscoveryIssue;
use crate::error::HubResult;
use crate::infrastructure::loader::load_isolated;

use super::cache::{CacheOutcome, ModuleCache};
use super::options::DiscoveryOptions;
use super::report::{Composition, DiscoveryReport};

pub struct DiscoveryUseCase<L>
where
    L: ModuleLoader,
{
    options: DiscoveryOptions,
    loader: L,
}

impl<L> DiscoveryUseCase<L>
where
    L: ModuleLoader,
{
    pub fn new(options: DiscoveryOptions, loader: L) -> Self {
        Self { options, loader }
    }

    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Run a pass that executes every module
    pub fn run(&self) -> HubResult<Composition> {
        self.execute(None)
    }

    /// Run a pass that re-executes only changed or new modules
    pub fn run_cached(&self, cache: &mut ModuleCache) -> HubResult<Composition> {
        self.execute(Some(cache))
    }

    fn execute(&self, mut cache: Option<&mut ModuleCache>) -> HubResult<Composition> {
        let scan = self.options.scanner().scan()?;
        let mut report = DiscoveryReport {
            examples_scanned: scan.listings.len(),
            issues: scan.issues,
            ..DiscoveryReport::default()
        };

        let matcher = self.options.matcher();
        let mut candidates = Vec::new();
        for listing in &scan.listings {
            let outcome = matcher.match_listing(listing);
            record(&mut report, outcome.issues);
            candidates.extend(outcome.candidates);
        }
        report.candidates = candidates.len();

        let mut live = HashSet::new();
        let mut routers = Vec::new();
        for candidate in &candidates {
            live.insert(candidate.module_path.clone());
            let module = match cache.as_deref_mut() {
                Some(cache) => {
                    let (module, outcome) = cache.load(&self.loader, candidate);
                    match outcome {
                        CacheOutcome::Loaded => report.modules_loaded += 1,
                        CacheOutcome::Reused => report.modules_reused += 1,
                    }
                    module
                }
                None => {
                    report.modules_loaded += 1;
                    load_isolated(&self.loader, candidate)
                }
            };

            if let Some(issue) = import_failure(&module) {
                record(&mut report, vec![issue]);
                continue;
            }

            let extraction = RouteExtractor::extract(&module);
            record(&mut report, extraction.issues);
            routers.extend(extraction.router);
        }

        if let Some(cache) = cache {
            cache.retain_only(&live);
        }

        let composed = self.options.composer().compose(routers);
        record(&mut report, composed.issues);

        report.mounted_routers = composed.table.mounts().len();
        report.routes = composed.table.route_count();

        info!(
            "mounted {} router(s) with {} route(s) from {} example(s)",
            report.mounted_routers, report.routes, report.examples_scanned
        );
        debug!(
            "{} module(s) loaded, {} reused, {} issue(s)",
            report.modules_loaded,
            report.modules_reused,
            report.issues.len()
        );

        Ok(Composition {
            table: composed.table,
            report,
        })
    }
}

fn import_failure(module: &LoadedModule) -> Option<DiscoveryIssue> {
    let error = module.import_error()?;
    let candidate = &module.candidate;
    Some(DiscoveryIssue::ImportFailure {
        example: candidate.example.id(),
        worker_type: candidate.worker_type.to_string(),
        path: candidate.module_path.clone(),
        message: error.to_string(),
    })
}

fn record(report: &mut DiscoveryReport, issues: Vec<DiscoveryIssue>) {
    for issue in issues {
        issue.emit();
        report.issues.push(issue);
    }
}
