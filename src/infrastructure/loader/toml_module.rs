//! Declarative TOML modules
//!
//! Every top-level table carrying a `routes` array is an export:
//!
//! ```toml
//! [gpu_router]
//! tags = ["GPU Workers"]
//!
//! [[gpu_router.routes]]
//! method = "POST"
//! path = "/hello"
//! handler = "gpu_hello"
//! response = { status = "success" }
//! ```
//!
//! The file is read again on every load.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::entities::{ModuleExports, Router, StaticHandler, WorkerCandidate};
use crate::domain::ports::{DeclaredRoute, ModuleError, ModuleLoader};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlRouter {
    #[serde(default)]
    tags: Vec<String>,
    routes: Vec<TomlRoute>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlRoute {
    method: String,
    path: String,
    #[serde(default)]
    handler: Option<String>,
    #[serde(default)]
    response: Option<toml::Value>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlModuleLoader;

impl TomlModuleLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse module source already read from `path`
    pub fn parse(path: &Path, content: &str) -> Result<ModuleExports, ModuleError> {
        let table: toml::Table = toml::from_str(content).map_err(|e| ModuleError::Syntax {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;

        let mut exports = ModuleExports::new();
        for (name, value) in table {
            let is_router = value
                .as_table()
                .is_some_and(|t| t.contains_key("routes"));
            if !is_router {
                continue;
            }
            let router: TomlRouter = value.try_into().map_err(|e: toml::de::Error| {
                ModuleError::Invalid {
                    path: path.to_path_buf(),
                    message: format!("export '{}': {}", name, e.message()),
                }
            })?;
            exports.insert(name.clone(), Arc::new(build_router(path, &name, router)?));
        }
        Ok(exports)
    }
}

fn build_router(path: &Path, export: &str, declared: TomlRouter) -> Result<Router, ModuleError> {
    let mut router = Router::new();
    for tag in declared.tags {
        router = router.with_tag(tag);
    }
    for route in declared.routes {
        let handler_name = route
            .handler
            .unwrap_or_else(|| format!("{}:{} {}", export, route.method, route.path));
        let response = route
            .response
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ModuleError::Invalid {
                path: path.to_path_buf(),
                message: format!("response of {} {}: {}", route.method, route.path, e),
            })?;
        router.push(DeclaredRoute {
            method: route.method,
            path: route.path,
            handler: Arc::new(StaticHandler::new(handler_name, response)),
            tags: route.tags.into_iter().collect::<BTreeSet<_>>(),
        });
    }
    Ok(router)
}

impl ModuleLoader for TomlModuleLoader {
    fn load(&self, candidate: &WorkerCandidate) -> Result<ModuleExports, ModuleError> {
        let path = &candidate.module_path;
        let content = fs::read_to_string(path).map_err(|e| ModuleError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Self::parse(path, &content)
    }
}
