//! Worker Type Value Object
//!
//! A short token (`gpu`, `cpu`, ...) naming the execution resource an
//! example's router belongs to.

use std::fmt;

/// Validated worker type token
///
/// Only ASCII alphanumeric tokens are accepted, so a token can never contain
/// the `_` separator used by the `{worker_type}_worker` file convention.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerType(String);

impl WorkerType {
    /// Parse a token, returning `None` when it is empty or contains separators
    pub fn parse(token: &str) -> Option<Self> {
        if !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric()) {
            Some(Self(token.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Export name a module must use for this worker type's router
    pub fn router_attribute(&self) -> String {
        format!("{}_router", self.0)
    }
}

impl fmt::Display for WorkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for WorkerType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_alphanumeric_tokens() {
        assert_eq!(WorkerType::parse("gpu").unwrap().as_str(), "gpu");
        assert_eq!(WorkerType::parse("cpu2").unwrap().as_str(), "cpu2");
    }

    #[test]
    fn parse_rejects_separators_and_empty() {
        assert!(WorkerType::parse("").is_none());
        assert!(WorkerType::parse("gpu_lb").is_none());
        assert!(WorkerType::parse("gpu-lb").is_none());
        assert!(WorkerType::parse("__pycache__").is_none());
    }

    #[test]
    fn router_attribute_follows_convention() {
        let wt = WorkerType::parse("gpu").unwrap();
        assert_eq!(wt.router_attribute(), "gpu_router");
    }
}
