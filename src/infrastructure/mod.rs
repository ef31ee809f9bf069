//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Example scanning, module fingerprints, atomic writes
//! - `loader/` - Module loaders (compiled-in registry, TOML modules)
//! - `repositories/` - Manifest repository (pyproject-style TOML)

pub mod fs;
pub mod loader;
pub mod repositories;

pub use fs::{ExampleScanner, ScanOutcome};
pub use loader::{load_isolated, ModuleRegistry, TomlModuleLoader};
pub use repositories::TomlManifestRepository;
