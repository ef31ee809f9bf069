//! Route table snapshot
//!
//! The immutable result of one composition. A reload builds a new table
//! rather than mutating this one.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{json, Value};

use crate::domain::ports::{Handler, HandlerError};
use crate::domain::value_objects::{HttpMethod, MountedPrefix};

pub const HOME_PATH: &str = "/";
pub const HEALTH_PATH: &str = "/health";
pub const PING_PATH: &str = "/ping";
pub const EXECUTE_PATH: &str = "/execute";

/// Sub-paths examples may not declare; the composing layer owns them
pub const RESERVED_PATHS: [&str; 2] = [PING_PATH, EXECUTE_PATH];

/// Routes served by the composing layer itself
pub const FRAMEWORK_ROUTES: [(HttpMethod, &str); 4] = [
    (HttpMethod::Get, HOME_PATH),
    (HttpMethod::Get, HEALTH_PATH),
    (HttpMethod::Get, PING_PATH),
    (HttpMethod::Post, EXECUTE_PATH),
];

#[derive(Debug, Clone)]
pub struct MountedRoute {
    pub method: HttpMethod,
    /// Full path: prefix followed by the declared sub-path
    pub path: String,
    pub declared_path: String,
    pub handler: Handler,
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone)]
pub struct MountedRouter {
    pub prefix: MountedPrefix,
    /// Documentation tag shared by every route under the prefix
    pub tag: String,
    pub routes: Vec<MountedRoute>,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("no route for {method} {path}")]
    NotFound { method: HttpMethod, path: String },

    #[error("{method} not allowed for {path}")]
    MethodNotAllowed { method: HttpMethod, path: String },

    #[error("invalid execute request: {0}")]
    InvalidExecute(String),

    #[error(transparent)]
    Handler(#[from] HandlerError),
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    mounts: Vec<MountedRouter>,
}

impl RouteTable {
    /// Build a table; mounts are ordered by prefix.
    pub fn new(mut mounts: Vec<MountedRouter>) -> Self {
        mounts.sort_by(|a, b| a.prefix.prefix.cmp(&b.prefix.prefix));
        Self { mounts }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn mounts(&self) -> &[MountedRouter] {
        &self.mounts
    }

    pub fn routes(&self) -> impl Iterator<Item = (&MountedRouter, &MountedRoute)> {
        self.mounts
            .iter()
            .flat_map(|m| m.routes.iter().map(move |r| (m, r)))
    }

    pub fn route_count(&self) -> usize {
        self.mounts.iter().map(|m| m.routes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }

    /// Ordered `(prefix, method, path)` tuples; equal tables have equal signatures.
    pub fn signature(&self) -> Vec<(String, HttpMethod, String)> {
        self.routes()
            .map(|(m, r)| (m.prefix.prefix.clone(), r.method, r.path.clone()))
            .collect()
    }

    pub fn find(&self, method: HttpMethod, path: &str) -> Option<&MountedRoute> {
        self.routes()
            .map(|(_, r)| r)
            .find(|r| r.method == method && r.path == path)
    }

    /// Serve one request against this snapshot.
    pub fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Value,
    ) -> Result<Value, DispatchError> {
        match (method, path) {
            (HttpMethod::Get, HOME_PATH) => Ok(self.home()),
            (HttpMethod::Get, HEALTH_PATH) => Ok(self.health()),
            (HttpMethod::Get, PING_PATH) => Ok(json!({ "status": "healthy" })),
            (HttpMethod::Post, EXECUTE_PATH) => self.execute(payload),
            _ => self.dispatch_mounted(method, path, payload),
        }
    }

    fn dispatch_mounted(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Value,
    ) -> Result<Value, DispatchError> {
        if let Some(route) = self.find(method, path) {
            return Ok(route.handler.handle(payload)?);
        }
        let path_known = self.routes().any(|(_, r)| r.path == path)
            || FRAMEWORK_ROUTES.iter().any(|(_, p)| *p == path);
        if path_known {
            Err(DispatchError::MethodNotAllowed {
                method,
                path: path.to_string(),
            })
        } else {
            Err(DispatchError::NotFound {
                method,
                path: path.to_string(),
            })
        }
    }

    /// `POST /execute` body: `{"method": "POST", "path": "/...", "input": {...}}`
    fn execute(&self, payload: Value) -> Result<Value, DispatchError> {
        let path = payload
            .get("path")
            .and_then(Value::as_str)
            .ok_or_else(|| DispatchError::InvalidExecute("missing 'path'".to_string()))?;
        let method = match payload.get("method").and_then(Value::as_str) {
            Some(m) => m
                .parse::<HttpMethod>()
                .map_err(|e| DispatchError::InvalidExecute(e.to_string()))?,
            None => HttpMethod::Post,
        };
        let input = payload.get("input").cloned().unwrap_or(Value::Null);
        self.dispatch_mounted(method, path, input)
    }

    /// Home document: every mounted example with its endpoint patterns
    pub fn home(&self) -> Value {
        let examples = self.examples_metadata();
        json!({
            "message": "Unified worker examples",
            "examples": examples,
            "navigation": { "health": HEALTH_PATH, "ping": PING_PATH },
            "discovery": {
                "total_examples": examples.len(),
                "total_routes": self.route_count(),
            },
        })
    }

    /// Health document: status plus a loaded flag per mounted example
    pub fn health(&self) -> Value {
        let loaded: BTreeMap<String, bool> = self
            .mounts
            .iter()
            .map(|m| (m.prefix.example.id(), true))
            .collect();
        json!({
            "status": "healthy",
            "total_examples": loaded.len(),
            "examples_loaded": loaded,
        })
    }

    fn examples_metadata(&self) -> BTreeMap<String, Value> {
        let mut examples: BTreeMap<String, (&str, BTreeMap<String, String>)> = BTreeMap::new();
        for mount in &self.mounts {
            let example = &mount.prefix.example;
            let (_, endpoints) = examples
                .entry(example.id())
                .or_insert_with(|| (example.name.as_str(), BTreeMap::new()));
            endpoints.insert(
                mount.prefix.worker_type.to_string(),
                format!("{}/*", mount.prefix.prefix),
            );
        }
        examples
            .into_iter()
            .map(|(id, (name, endpoints))| {
                let description = format!("Example: {}", title_case(name));
                (id, json!({ "description": description, "endpoints": endpoints }))
            })
            .collect()
    }
}

fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{handler_fn, ExampleLocation};
    use crate::domain::value_objects::WorkerType;

    fn table() -> RouteTable {
        let example = ExampleLocation::new("01_getting_started", "hello_world", "/r/h");
        let prefix = MountedPrefix::compute(&example, &WorkerType::parse("gpu").unwrap(), false);
        let route = MountedRoute {
            method: HttpMethod::Post,
            path: prefix.join("/hello"),
            declared_path: "/hello".to_string(),
            handler: handler_fn("gpu_hello", |p| Ok(json!({ "got": p }))),
            tags: BTreeSet::new(),
        };
        RouteTable::new(vec![MountedRouter {
            prefix,
            tag: "01_getting_started > hello_world".to_string(),
            routes: vec![route],
        }])
    }

    #[test]
    fn dispatch_reaches_mounted_handler() {
        let out = table()
            .dispatch(
                HttpMethod::Post,
                "/01_getting_started/hello_world/gpu/hello",
                json!(7),
            )
            .unwrap();
        assert_eq!(out, json!({ "got": 7 }));
    }

    #[test]
    fn dispatch_distinguishes_method_from_missing_path() {
        let t = table();
        let err = t
            .dispatch(HttpMethod::Get, "/01_getting_started/hello_world/gpu/hello", Value::Null)
            .unwrap_err();
        assert!(matches!(err, DispatchError::MethodNotAllowed { .. }));

        let err = t.dispatch(HttpMethod::Get, "/nope", Value::Null).unwrap_err();
        assert!(matches!(err, DispatchError::NotFound { .. }));
    }

    #[test]
    fn execute_invokes_mounted_route() {
        let out = table()
            .dispatch(
                HttpMethod::Post,
                EXECUTE_PATH,
                json!({
                    "path": "/01_getting_started/hello_world/gpu/hello",
                    "input": { "name": "x" },
                }),
            )
            .unwrap();
        assert_eq!(out, json!({ "got": { "name": "x" } }));
    }

    #[test]
    fn execute_requires_path() {
        let err = table()
            .dispatch(HttpMethod::Post, EXECUTE_PATH, json!({}))
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidExecute(_)));
    }

    #[test]
    fn home_lists_endpoints_per_example() {
        let home = table().home();
        let example = &home["examples"]["01_getting_started/hello_world"];
        assert_eq!(example["description"], "Example: Hello World");
        assert_eq!(
            example["endpoints"]["gpu"],
            "/01_getting_started/hello_world/gpu/*"
        );
        assert_eq!(home["discovery"]["total_routes"], 1);
    }

    #[test]
    fn health_and_ping() {
        let t = table();
        let health = t.dispatch(HttpMethod::Get, HEALTH_PATH, Value::Null).unwrap();
        assert_eq!(health["examples_loaded"]["01_getting_started/hello_world"], true);
        let ping = t.dispatch(HttpMethod::Get, PING_PATH, Value::Null).unwrap();
        assert_eq!(ping, json!({ "status": "healthy" }));
    }
}
