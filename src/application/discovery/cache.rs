//! Module cache for incremental reload
//!
//! Keyed by module path. A module is re-executed only when its source
//! fingerprint changed, when it is new, or when its candidate changed shape.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::{LoadedModule, WorkerCandidate};
use crate::domain::ports::{ModuleError, ModuleLoader};
use crate::domain::value_objects::ContentHash;
use crate::infrastructure::fs::fingerprint;
use crate::infrastructure::loader::load_isolated;

#[derive(Debug, Clone)]
struct CachedModule {
    fingerprint: ContentHash,
    module: LoadedModule,
}

/// Whether a cache lookup executed the module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Loaded,
    Reused,
}

#[derive(Debug, Default)]
pub struct ModuleCache {
    entries: HashMap<PathBuf, CachedModule>,
}

impl ModuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, module_path: &Path) -> bool {
        self.entries.contains_key(module_path)
    }

    pub fn fingerprint_of(&self, module_path: &Path) -> Option<&ContentHash> {
        self.entries.get(module_path).map(|c| &c.fingerprint)
    }

    /// Return the cached module when its source is unchanged, otherwise load it
    pub fn load(
        &mut self,
        loader: &dyn ModuleLoader,
        candidate: &WorkerCandidate,
    ) -> (LoadedModule, CacheOutcome) {
        let current = match fingerprint(candidate) {
            Ok(hash) => hash,
            Err(e) => {
                self.invalidate(&candidate.module_path);
                let error = ModuleError::Io {
                    path: candidate.module_path.clone(),
                    message: e.to_string(),
                };
                return (
                    LoadedModule::failed(candidate.clone(), error),
                    CacheOutcome::Loaded,
                );
            }
        };

        if let Some(cached) = self.entries.get(&candidate.module_path) {
            if cached.fingerprint == current && cached.module.candidate == *candidate {
                debug!("{}: unchanged, reusing", candidate.module_key);
                return (cached.module.clone(), CacheOutcome::Reused);
            }
        }

        let module = load_isolated(loader, candidate);
        self.entries.insert(
            candidate.module_path.clone(),
            CachedModule {
                fingerprint: current,
                module: module.clone(),
            },
        );
        (module, CacheOutcome::Loaded)
    }

    pub fn invalidate(&mut self, module_path: &Path) {
        self.entries.remove(module_path);
    }

    /// Evict every module not discovered in the latest pass
    pub fn retain_only(&mut self, live: &HashSet<PathBuf>) {
        let before = self.entries.len();
        self.entries.retain(|path, _| live.contains(path));
        let evicted = before - self.entries.len();
        if evicted > 0 {
            debug!("evicted {} module(s) no longer discovered", evicted);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
