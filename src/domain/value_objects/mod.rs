//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod discovery_issue;
mod hash;
mod http_method;
mod prefix;
mod worker_type;

pub use discovery_issue::{DiscoveryIssue, IssueKind, Severity};
pub use hash::ContentHash;
pub use http_method::{HttpMethod, UnknownMethod};
pub use prefix::{doc_tag, MountedPrefix};
pub use worker_type::WorkerType;
