//! ModuleLoader port
//!
//! Turns a worker candidate into the exports of its module. Implementations
//! must re-execute the module on every call; caching is the caller's decision.

use std::path::PathBuf;

use crate::domain::entities::{ModuleExports, WorkerCandidate};

pub trait ModuleLoader: Send + Sync {
    fn load(&self, candidate: &WorkerCandidate) -> Result<ModuleExports, ModuleError>;
}

/// Failure while importing a module
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleError {
    #[error("cannot read module {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("syntax error in {path}: {message}")]
    Syntax { path: PathBuf, message: String },

    #[error("invalid module {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("module {path} raised an error: {message}")]
    Raised { path: PathBuf, message: String },

    #[error("module {path} panicked during import: {message}")]
    Panicked { path: PathBuf, message: String },

    #[error("no module registered for '{key}'")]
    NotRegistered { key: String },
}
