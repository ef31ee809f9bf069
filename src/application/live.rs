//! Live route table
//!
//! Requests read an `Arc` snapshot; a reload builds a complete new table and
//! swaps it in with one write. A request never observes a partially built
//! table, and a request already holding a snapshot finishes against it.

use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::domain::entities::{DispatchError, RouteTable};
use crate::domain::value_objects::HttpMethod;

#[derive(Debug, Default)]
pub struct LiveRouteTable {
    current: RwLock<Arc<RouteTable>>,
}

impl LiveRouteTable {
    pub fn new(table: RouteTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    pub fn snapshot(&self) -> Arc<RouteTable> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Install a new table, returning the one it replaced
    pub fn swap(&self, table: RouteTable) -> Arc<RouteTable> {
        let next = Arc::new(table);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, next)
    }

    /// Dispatch against the current snapshot; the lock is not held while the
    /// handler runs.
    pub fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Value,
    ) -> Result<Value, DispatchError> {
        self.snapshot().dispatch(method, path, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{handler_fn, ExampleLocation, MountedRoute, MountedRouter};
    use crate::domain::value_objects::{MountedPrefix, WorkerType};
    use serde_json::json;
    use std::collections::BTreeSet;

    fn table(reply: &'static str) -> RouteTable {
        let example = ExampleLocation::new("01_a", "x", "/r/01_a/x");
        let prefix = MountedPrefix::compute(&example, &WorkerType::parse("gpu").unwrap(), false);
        RouteTable::new(vec![MountedRouter {
            tag: "01_a > x".to_string(),
            routes: vec![MountedRoute {
                method: HttpMethod::Get,
                path: prefix.join("/v"),
                declared_path: "/v".to_string(),
                handler: handler_fn("v", move |_| Ok(json!(reply))),
                tags: BTreeSet::new(),
            }],
            prefix,
        }])
    }

    #[test]
    fn swap_replaces_table_for_new_readers_only() {
        let live = LiveRouteTable::new(table("old"));
        let held = live.snapshot();

        let previous = live.swap(table("new"));
        assert!(Arc::ptr_eq(&previous, &held));

        assert_eq!(
            held.dispatch(HttpMethod::Get, "/01_a/x/gpu/v", Value::Null).unwrap(),
            json!("old")
        );
        assert_eq!(
            live.dispatch(HttpMethod::Get, "/01_a/x/gpu/v", Value::Null).unwrap(),
            json!("new")
        );
    }

    #[test]
    fn concurrent_readers_see_whole_tables() {
        let live = Arc::new(LiveRouteTable::new(table("a")));
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let live = Arc::clone(&live);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let snapshot = live.snapshot();
                        assert_eq!(snapshot.route_count(), 1);
                    }
                })
            })
            .collect();
        for i in 0..50 {
            live.swap(table(if i % 2 == 0 { "b" } else { "a" }));
        }
        for r in readers {
            r.join().unwrap();
        }
    }
}
