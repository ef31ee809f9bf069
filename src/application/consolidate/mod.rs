//! Dependency consolidation
//!
//! `SyncDepsUseCase` gathers every example's declared dependencies, merges
//! them, and writes, previews or checks the root manifest.

mod result;
mod use_case;

#[cfg(test)]
mod tests;

pub use result::{SyncDepsResult, SyncMode};
pub use use_case::{SyncDepsOptions, SyncDepsUseCase};
