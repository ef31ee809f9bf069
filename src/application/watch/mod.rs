//! Watch Use Case
//!
//! Hot reload of the examples tree:
//! - File system monitoring (via `notify` crate)
//! - Debouncing (100ms default)
//! - Incremental reload (only changed modules are re-executed)
//! - Atomic swap of the live route table
//!
//! ## Usage
//!
//! ```ignore
//! let use_case = WatchUseCase::new(discovery, WatchOptions::default());
//! use_case.start(live, running, |event| { ... });
//! ```

mod event;
mod use_case;


pub use event::{WatchEvent, WatchOptions, WatcherState, DEBOUNCE_MS, STARTUP_DRAIN_MS};
pub use use_case::WatchUseCase;
