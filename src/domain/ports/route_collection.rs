//! RouteCollection port
//!
//! The capability an example module exports: "I expose a collection of
//! routes". Discovery only ever talks to routers through this trait.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Error raised by a route handler
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    #[error("handler '{0}' has no implementation bound")]
    Unbound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Failed(String),
}

/// Something that can answer a request routed to it
pub trait RouteHandler: Send + Sync {
    fn name(&self) -> &str;
    fn handle(&self, payload: Value) -> Result<Value, HandlerError>;
}

impl fmt::Debug for dyn RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({})", self.name())
    }
}

pub type Handler = Arc<dyn RouteHandler>;

/// A route exactly as a module declared it, before structural validation
#[derive(Debug, Clone)]
pub struct DeclaredRoute {
    pub method: String,
    pub path: String,
    pub handler: Handler,
    pub tags: BTreeSet<String>,
}

/// Anything enumerable into declared routes
pub trait RouteCollection: Send + Sync {
    /// Routes in declaration order
    fn routes(&self) -> Vec<DeclaredRoute>;
}
