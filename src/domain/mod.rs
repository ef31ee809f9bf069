//! Domain Layer
//!
//! Discovery, composition and consolidation logic without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Examples, candidates, loaded modules, routers, route tables
//! - `value_objects/` - Worker types, prefixes, HTTP methods, hashes, issues
//! - `services/` - PatternMatcher, RouteExtractor, AppComposer, consolidation
//! - `ports/` - Traits the infrastructure layer implements
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - Module loading and manifests go through ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
