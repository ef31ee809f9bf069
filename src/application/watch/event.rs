//! Watch event types and debounce state

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Startup drain: notify sometimes reports existing files right after a watch
/// is registered
pub const STARTUP_DRAIN_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub debounce: Duration,
    /// Emit NDJSON instead of human-readable lines
    pub json: bool,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEBOUNCE_MS),
            json: false,
        }
    }
}

impl WatchOptions {
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce = Duration::from_millis(ms);
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    WatchStarted { root: String },
    FileChanged { path: String },
    ReloadStarted,
    ReloadComplete {
        mounted: usize,
        routes: usize,
        reloaded: usize,
        warnings: usize,
    },
    /// Reload failed; the previous table stays live
    Error { message: String },
    Shutdown,
}

impl WatchEvent {
    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Watcher state for debouncing
#[derive(Debug)]
pub struct WatcherState {
    pending_changes: HashSet<PathBuf>,
    last_change: Option<Instant>,
    debounce: Duration,
}

impl Default for WatcherState {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}

impl WatcherState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            pending_changes: HashSet::new(),
            last_change: None,
            debounce,
        }
    }

    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// Debounce period has passed and changes are pending
    pub fn should_reload(&self) -> bool {
        match self.last_change {
            Some(last) => !self.pending_changes.is_empty() && last.elapsed() >= self.debounce,
            None => false,
        }
    }

    /// Take all pending changes, sorted, resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        let mut changes: Vec<_> = self.pending_changes.drain().collect();
        changes.sort();
        self.last_change = None;
        changes
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }
}
