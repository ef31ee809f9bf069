//! Compiled-in module registry
//!
//! Modules written in Rust register a factory under their module key
//! (`category/example/gpu_worker.toml`). The factory runs on every load, so a
//! reload always observes fresh exports.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::{ModuleExports, WorkerCandidate};
use crate::domain::ports::{ModuleError, ModuleLoader};

type Factory = Arc<dyn Fn() -> Result<ModuleExports, ModuleError> + Send + Sync>;

#[derive(Clone, Default)]
pub struct ModuleRegistry {
    factories: BTreeMap<String, Factory>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, module_key: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<ModuleExports, ModuleError> + Send + Sync + 'static,
    {
        self.factories.insert(module_key.into(), Arc::new(factory));
    }

    /// Builder form of [`ModuleRegistry::register`]
    pub fn with_module<F>(mut self, module_key: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<ModuleExports, ModuleError> + Send + Sync + 'static,
    {
        self.register(module_key, factory);
        self
    }

    pub fn contains(&self, module_key: &str) -> bool {
        self.factories.contains_key(module_key)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ModuleLoader for ModuleRegistry {
    fn load(&self, candidate: &WorkerCandidate) -> Result<ModuleExports, ModuleError> {
        let factory = self
            .factories
            .get(&candidate.module_key)
            .ok_or_else(|| ModuleError::NotRegistered {
                key: candidate.module_key.clone(),
            })?;
        factory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{handler_fn, DiscoveryPattern, ExampleLocation, Router};
    use crate::domain::value_objects::WorkerType;
    use serde_json::Value;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn candidate(key: &str) -> WorkerCandidate {
        WorkerCandidate {
            example: ExampleLocation::new("01_a", "x", "/r/01_a/x"),
            worker_type: WorkerType::parse("gpu").unwrap(),
            module_path: PathBuf::from("/r").join(key),
            module_key: key.to_string(),
            pattern: DiscoveryPattern::SingleFile,
        }
    }

    #[test]
    fn factory_runs_on_every_load() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        let registry = ModuleRegistry::new().with_module("01_a/x/gpu_worker.toml", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(ModuleExports::new().export(
                "gpu_router",
                Router::new().post("/a", handler_fn("a", |_| Ok(Value::Null))),
            ))
        });

        let c = candidate("01_a/x/gpu_worker.toml");
        registry.load(&c).unwrap();
        registry.load(&c).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unknown_key_is_not_registered() {
        let err = ModuleRegistry::new()
            .load(&candidate("01_a/x/cpu_worker.toml"))
            .unwrap_err();
        assert_eq!(
            err,
            ModuleError::NotRegistered {
                key: "01_a/x/cpu_worker.toml".to_string()
            }
        );
    }
}
