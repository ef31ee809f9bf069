//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DiscoveryUseCase` - Scan, match, load, extract and compose example routes
//! - `WatchUseCase` - Rebuild the route table when example sources change
//! - `SyncDepsUseCase` - Consolidate example dependencies into the root manifest
//!
//! `LiveRouteTable` is the swappable table a serving process dispatches from.

pub mod consolidate;
pub mod discovery;
pub mod live;
pub mod watch;

pub use consolidate::{SyncDepsOptions, SyncDepsResult, SyncDepsUseCase, SyncMode};
pub use discovery::{
    CacheOutcome, Composition, DiscoveryOptions, DiscoveryReport, DiscoveryUseCase, ModuleCache,
};
pub use live::LiveRouteTable;
pub use watch::{WatchEvent, WatchOptions, WatchUseCase, WatcherState, DEBOUNCE_MS};
