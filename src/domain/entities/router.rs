//! Router entity
//!
//! The standard `RouteCollection` implementation: an ordered list of routes
//! plus router-wide tags, assembled with a small builder.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::ports::{DeclaredRoute, Handler, HandlerError, RouteCollection, RouteHandler};

#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<DeclaredRoute>,
    tags: BTreeSet<String>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag applied to every route of this router
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Add a route. The method is kept verbatim; validation happens at extraction.
    pub fn route(
        mut self,
        method: impl Into<String>,
        path: impl Into<String>,
        handler: Handler,
    ) -> Self {
        self.routes.push(DeclaredRoute {
            method: method.into(),
            path: path.into(),
            handler,
            tags: BTreeSet::new(),
        });
        self
    }

    /// Add a fully described route, keeping its own tags
    pub fn push(&mut self, route: DeclaredRoute) {
        self.routes.push(route);
    }

    pub fn get(self, path: impl Into<String>, handler: Handler) -> Self {
        self.route("GET", path, handler)
    }

    pub fn post(self, path: impl Into<String>, handler: Handler) -> Self {
        self.route("POST", path, handler)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteCollection for Router {
    fn routes(&self) -> Vec<DeclaredRoute> {
        self.routes
            .iter()
            .cloned()
            .map(|mut route| {
                route.tags.extend(self.tags.iter().cloned());
                route
            })
            .collect()
    }
}

/// Handler backed by a closure
pub struct FnHandler<F> {
    name: String,
    func: F,
}

impl<F> FnHandler<F>
where
    F: Fn(Value) -> Result<Value, HandlerError> + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> RouteHandler for FnHandler<F>
where
    F: Fn(Value) -> Result<Value, HandlerError> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, payload: Value) -> Result<Value, HandlerError> {
        (self.func)(payload)
    }
}

/// Shorthand for `Arc::new(FnHandler::new(..))`
pub fn handler_fn<F>(name: impl Into<String>, func: F) -> Handler
where
    F: Fn(Value) -> Result<Value, HandlerError> + Send + Sync + 'static,
{
    Arc::new(FnHandler::new(name, func))
}

/// Handler declared in a module file: replies with a fixed document, if any
#[derive(Debug, Clone)]
pub struct StaticHandler {
    name: String,
    response: Option<Value>,
}

impl StaticHandler {
    pub fn new(name: impl Into<String>, response: Option<Value>) -> Self {
        Self {
            name: name.into(),
            response,
        }
    }
}

impl RouteHandler for StaticHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, _payload: Value) -> Result<Value, HandlerError> {
        self.response
            .clone()
            .ok_or_else(|| HandlerError::Unbound(self.name.clone()))
    }
}
