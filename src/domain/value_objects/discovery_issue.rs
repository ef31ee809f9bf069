//! Discovery issues
//!
//! Failures local to one example or candidate. They never abort a discovery
//! pass; they are collected into the report and logged where they arise.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    StructuralMismatch,
    UnreadableDirectory,
    NamingConflict,
    ImportFailure,
    MissingRouter,
    InvalidRoute,
    DuplicateRoute,
    ReservedPathViolation,
    PrefixCollision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscoveryIssue {
    /// Example directory matched no worker pattern
    StructuralMismatch { example: String, directory: PathBuf },
    UnreadableDirectory { path: PathBuf, message: String },
    /// Same worker type found as a file and as a package
    NamingConflict {
        example: String,
        worker_type: String,
        paths: Vec<PathBuf>,
    },
    ImportFailure {
        example: String,
        worker_type: String,
        path: PathBuf,
        message: String,
    },
    MissingRouter {
        example: String,
        expected: String,
        path: PathBuf,
        available: Vec<String>,
    },
    InvalidRoute {
        example: String,
        worker_type: String,
        method: String,
        path: String,
        reason: String,
    },
    DuplicateRoute {
        example: String,
        worker_type: String,
        method: String,
        path: String,
    },
    ReservedPathViolation {
        example: String,
        worker_type: String,
        path: String,
    },
    PrefixCollision { prefix: String, examples: Vec<PathBuf> },
}

impl DiscoveryIssue {
    pub fn kind(&self) -> IssueKind {
        match self {
            DiscoveryIssue::StructuralMismatch { .. } => IssueKind::StructuralMismatch,
            DiscoveryIssue::UnreadableDirectory { .. } => IssueKind::UnreadableDirectory,
            DiscoveryIssue::NamingConflict { .. } => IssueKind::NamingConflict,
            DiscoveryIssue::ImportFailure { .. } => IssueKind::ImportFailure,
            DiscoveryIssue::MissingRouter { .. } => IssueKind::MissingRouter,
            DiscoveryIssue::InvalidRoute { .. } => IssueKind::InvalidRoute,
            DiscoveryIssue::DuplicateRoute { .. } => IssueKind::DuplicateRoute,
            DiscoveryIssue::ReservedPathViolation { .. } => IssueKind::ReservedPathViolation,
            DiscoveryIssue::PrefixCollision { .. } => IssueKind::PrefixCollision,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DiscoveryIssue::StructuralMismatch { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }

    /// Log the issue through `tracing` at its severity
    pub fn emit(&self) {
        match self.severity() {
            Severity::Info => tracing::info!(kind = ?self.kind(), "{}", self),
            Severity::Warning => tracing::warn!(kind = ?self.kind(), "{}", self),
        }
    }
}

impl fmt::Display for DiscoveryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryIssue::StructuralMismatch { example, directory } => write!(
                f,
                "{example}: no worker modules found in {}",
                directory.display()
            ),
            DiscoveryIssue::UnreadableDirectory { path, message } => {
                write!(f, "cannot read {}: {message}", path.display())
            }
            DiscoveryIssue::NamingConflict {
                example,
                worker_type,
                paths,
            } => {
                let listed: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                write!(
                    f,
                    "{example}: worker type '{worker_type}' is declared by both {}; skipping both",
                    listed.join(" and ")
                )
            }
            DiscoveryIssue::ImportFailure {
                example,
                worker_type,
                path,
                message,
            } => write!(
                f,
                "{example}/{worker_type}: could not load {}: {message}",
                path.display()
            ),
            DiscoveryIssue::MissingRouter {
                example,
                expected,
                path,
                available,
            } => {
                write!(
                    f,
                    "{example}: expected export '{expected}' not found in {}",
                    path.display()
                )?;
                if !available.is_empty() {
                    write!(f, " (found: {})", available.join(", "))?;
                }
                Ok(())
            }
            DiscoveryIssue::InvalidRoute {
                example,
                worker_type,
                method,
                path,
                reason,
            } => write!(
                f,
                "{example}/{worker_type}: ignoring route {method} '{path}': {reason}"
            ),
            DiscoveryIssue::DuplicateRoute {
                example,
                worker_type,
                method,
                path,
            } => write!(
                f,
                "{example}/{worker_type}: duplicate route {method} {path}; keeping the first"
            ),
            DiscoveryIssue::ReservedPathViolation {
                example,
                worker_type,
                path,
            } => write!(
                f,
                "{example}/{worker_type}: '{path}' is reserved by the composing layer; example not mounted"
            ),
            DiscoveryIssue::PrefixCollision { prefix, examples } => {
                let listed: Vec<String> =
                    examples.iter().map(|p| p.display().to_string()).collect();
                write!(
                    f,
                    "prefix '{prefix}' claimed by {}; none of them mounted",
                    listed.join(", ")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_router_names_expected_attribute_and_file() {
        let issue = DiscoveryIssue::MissingRouter {
            example: "01_getting_started/hello".to_string(),
            expected: "gpu_router".to_string(),
            path: PathBuf::from("01_getting_started/hello/gpu_worker.toml"),
            available: vec!["router".to_string()],
        };
        assert_eq!(
            issue.to_string(),
            "01_getting_started/hello: expected export 'gpu_router' not found in \
             01_getting_started/hello/gpu_worker.toml (found: router)"
        );
        assert_eq!(issue.severity(), Severity::Warning);
    }

    #[test]
    fn structural_mismatch_is_informational() {
        let issue = DiscoveryIssue::StructuralMismatch {
            example: "c/docs".to_string(),
            directory: PathBuf::from("c/docs"),
        };
        assert_eq!(issue.severity(), Severity::Info);
        assert_eq!(issue.kind(), IssueKind::StructuralMismatch);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let issue = DiscoveryIssue::PrefixCollision {
            prefix: "/hello/gpu".to_string(),
            examples: vec![PathBuf::from("a/hello"), PathBuf::from("b/hello")],
        };
        let json = serde_json::to_string(&issue).unwrap();
        assert!(json.contains("\"kind\":\"prefix_collision\""));
    }
}
