//! Domain Entities
//!
//! - `ExampleLocation` / `WorkerCandidate` - what discovery finds on disk
//! - `ModuleExports` / `LoadedModule` - what importing a candidate yields
//! - `Router` - the standard route collection
//! - `RouteTable` - the immutable composed snapshot
//! - `DependencyEntry` / `ConsolidatedManifest` - dependency consolidation

mod example;
mod manifest;
mod module;
mod route;
mod route_table;
mod router;

pub use example::{
    DiscoveryPattern, ExampleListing, ExampleLocation, WorkerCandidate, WorkerPackage,
};
pub use manifest::{ConsolidatedEntry, ConsolidatedManifest, DependencyEntry};
pub use module::{LoadedModule, ModuleExports};
pub use route::{path_problem, RouteDescriptor};
pub use route_table::{
    DispatchError, MountedRoute, MountedRouter, RouteTable, EXECUTE_PATH, FRAMEWORK_ROUTES,
    HEALTH_PATH, HOME_PATH, PING_PATH, RESERVED_PATHS,
};
pub use router::{handler_fn, FnHandler, Router, StaticHandler};
