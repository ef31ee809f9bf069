//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod manifest_repository;
pub mod module_loader;
pub mod route_collection;

pub use manifest_repository::{
    ConflictRecord, ManifestError, ManifestRepository, RootManifest, RootUpdate,
};
pub use module_loader::{ModuleError, ModuleLoader};
pub use route_collection::{DeclaredRoute, Handler, HandlerError, RouteCollection, RouteHandler};
