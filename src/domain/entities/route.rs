//! Validated route descriptor

use std::collections::BTreeSet;

use crate::domain::ports::Handler;
use crate::domain::value_objects::HttpMethod;

/// A structurally valid route: known verb, path starting with `/`
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    pub method: HttpMethod,
    pub path: String,
    pub handler: Handler,
    pub tags: BTreeSet<String>,
}

/// Why a declared path is not well-formed, if it is not
pub fn path_problem(path: &str) -> Option<&'static str> {
    if path.is_empty() {
        Some("path is empty")
    } else if !path.starts_with('/') {
        Some("path must start with '/'")
    } else if path.chars().any(char::is_whitespace) {
        Some("path contains whitespace")
    } else if path.contains("//") {
        Some("path contains an empty segment")
    } else {
        None
    }
}
