//! workerhub - worker example discovery and composition
//!
//! workerhub scans a tree of worker examples laid out as
//! `{category}/{example}/`, loads every `{worker_type}_worker` module (or
//! `workers/{worker_type}/` package), mounts each `{worker_type}_router` under
//! `/{category}/{example}/{worker_type}` and serves the result as one route
//! table. It also consolidates the examples' declared dependencies into a
//! single root manifest, flagging conflicts instead of resolving them.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

// Re-exports for convenience
pub use application::{
    Composition, DiscoveryOptions, DiscoveryReport, DiscoveryUseCase, LiveRouteTable,
    SyncDepsOptions, SyncDepsResult, SyncDepsUseCase, SyncMode, WatchEvent, WatchOptions,
    WatchUseCase,
};
pub use config::Config;
pub use domain::entities::{ModuleExports, RouteTable, Router};
pub use domain::value_objects::{DiscoveryIssue, HttpMethod, IssueKind};
pub use error::{HubError, HubResult};
pub use infrastructure::{ModuleRegistry, TomlManifestRepository, TomlModuleLoader};
