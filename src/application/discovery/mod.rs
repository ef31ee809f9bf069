//! Discovery
//!
//! - `DiscoveryUseCase` - scan, match, load, extract and compose in one pass
//! - `ModuleCache` - fingerprint-keyed cache used by hot reload
//! - `DiscoveryReport` - counts and issues of a pass

mod cache;
mod options;
mod report;
mod use_case;


pub use cache::{CacheOutcome, ModuleCache};
pub use options::DiscoveryOptions;
pub use report::{Composition, DiscoveryReport};
pub use use_case::DiscoveryUseCase;
