//! Loaded module entities

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::ports::{ModuleError, RouteCollection};

use super::WorkerCandidate;

/// Typed registry of the route collections a module exports, by export name
#[derive(Clone, Default)]
pub struct ModuleExports {
    routers: BTreeMap<String, Arc<dyn RouteCollection>>,
}

impl ModuleExports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn export(mut self, name: impl Into<String>, router: impl RouteCollection + 'static) -> Self {
        self.routers.insert(name.into(), Arc::new(router));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, router: Arc<dyn RouteCollection>) {
        self.routers.insert(name.into(), router);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn RouteCollection>> {
        self.routers.get(name)
    }

    /// Export names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.routers.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }
}

impl fmt::Debug for ModuleExports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleExports")
            .field("routers", &self.names())
            .finish()
    }
}

/// Outcome of importing one candidate
#[derive(Debug, Clone)]
pub struct LoadedModule {
    pub candidate: WorkerCandidate,
    pub result: Result<Arc<ModuleExports>, ModuleError>,
}

impl LoadedModule {
    pub fn loaded(candidate: WorkerCandidate, exports: ModuleExports) -> Self {
        Self {
            candidate,
            result: Ok(Arc::new(exports)),
        }
    }

    pub fn failed(candidate: WorkerCandidate, error: ModuleError) -> Self {
        Self {
            candidate,
            result: Err(error),
        }
    }

    pub fn module(&self) -> Option<&ModuleExports> {
        self.result.as_ref().ok().map(Arc::as_ref)
    }

    pub fn import_error(&self) -> Option<&ModuleError> {
        self.result.as_ref().err()
    }
}
