//! Module loaders
//!
//! - `ModuleRegistry` - compiled-in modules keyed by module path
//! - `TomlModuleLoader` - declarative worker files on disk
//!
//! [`load_isolated`] wraps any loader so that a failing or panicking module
//! only affects its own candidate.

mod registry;
mod toml_module;

use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::domain::entities::{LoadedModule, WorkerCandidate};
use crate::domain::ports::{ModuleError, ModuleLoader};

pub use registry::ModuleRegistry;
pub use toml_module::TomlModuleLoader;

/// Load one candidate, converting errors and panics into `import_error`
pub fn load_isolated(loader: &dyn ModuleLoader, candidate: &WorkerCandidate) -> LoadedModule {
    debug!("loading {}", candidate.module_key);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| loader.load(candidate)));
    match outcome {
        Ok(Ok(exports)) => LoadedModule::loaded(candidate.clone(), exports),
        Ok(Err(error)) => LoadedModule::failed(candidate.clone(), error),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            LoadedModule::failed(
                candidate.clone(),
                ModuleError::Panicked {
                    path: candidate.module_path.clone(),
                    message,
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DiscoveryPattern, ExampleLocation, ModuleExports};
    use crate::domain::value_objects::WorkerType;
    use std::path::PathBuf;

    fn candidate() -> WorkerCandidate {
        WorkerCandidate {
            example: ExampleLocation::new("01_a", "x", "/r/01_a/x"),
            worker_type: WorkerType::parse("gpu").unwrap(),
            module_path: PathBuf::from("/r/01_a/x/gpu_worker.toml"),
            module_key: "01_a/x/gpu_worker.toml".to_string(),
            pattern: DiscoveryPattern::SingleFile,
        }
    }

    #[test]
    fn panic_becomes_import_error() {
        let registry = ModuleRegistry::new().with_module("01_a/x/gpu_worker.toml", || {
            panic!("model weights missing")
        });
        let loaded = load_isolated(&registry, &candidate());
        match loaded.import_error() {
            Some(ModuleError::Panicked { message, .. }) => {
                assert_eq!(message, "model weights missing")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn returned_error_is_kept() {
        let registry = ModuleRegistry::new().with_module("01_a/x/gpu_worker.toml", || {
            Err(ModuleError::Raised {
                path: PathBuf::from("gpu_worker.toml"),
                message: "ImportError: torch".to_string(),
            })
        });
        let loaded = load_isolated(&registry, &candidate());
        assert!(matches!(loaded.import_error(), Some(ModuleError::Raised { .. })));
        assert!(loaded.module().is_none());
    }

    #[test]
    fn success_yields_exports() {
        let registry =
            ModuleRegistry::new().with_module("01_a/x/gpu_worker.toml", || Ok(ModuleExports::new()));
        let loaded = load_isolated(&registry, &candidate());
        assert!(loaded.import_error().is_none());
    }
}
