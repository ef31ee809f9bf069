//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod pyproject;

pub use pyproject::TomlManifestRepository;
