//! Watch Use Case implementation

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use crate::application::discovery::{DiscoveryReport, DiscoveryUseCase, ModuleCache};
use crate::application::live::LiveRouteTable;
use crate::domain::ports::ModuleLoader;
use crate::domain::value_objects::ContentHash;
use crate::error::{HubError, HubResult};
use crate::infrastructure::fs::hash_tree;

use super::event::{WatchEvent, WatchOptions, WatcherState, STARTUP_DRAIN_MS};

/// Watch Use Case
///
/// Re-runs discovery whenever the examples tree changes and swaps the live
/// route table. This is the entry point for `workerhub watch`.
pub struct WatchUseCase<L>
where
    L: ModuleLoader,
{
    discovery: DiscoveryUseCase<L>,
    options: WatchOptions,
}

impl<L> WatchUseCase<L>
where
    L: ModuleLoader,
{
    pub fn new(discovery: DiscoveryUseCase<L>, options: WatchOptions) -> Self {
        Self { discovery, options }
    }

    pub fn discovery(&self) -> &DiscoveryUseCase<L> {
        &self.discovery
    }

    /// One non-concurrent reload. On failure the previous table stays live.
    pub fn reload<F>(
        &self,
        live: &LiveRouteTable,
        cache: &mut ModuleCache,
        on_event: &F,
    ) -> HubResult<DiscoveryReport>
    where
        F: Fn(WatchEvent),
    {
        on_event(WatchEvent::ReloadStarted);
        match self.discovery.run_cached(cache) {
            Ok(composition) => {
                let report = composition.report;
                live.swap(composition.table);
                on_event(WatchEvent::ReloadComplete {
                    mounted: report.mounted_routers,
                    routes: report.routes,
                    reloaded: report.modules_loaded,
                    warnings: report.warnings().count(),
                });
                Ok(report)
            }
            Err(e) => {
                warn!("reload failed, keeping previous routes: {}", e);
                on_event(WatchEvent::Error {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Start watching (blocking) until `running` is cleared
    pub fn start<F>(
        &self,
        live: Arc<LiveRouteTable>,
        running: Arc<AtomicBool>,
        on_event: F,
    ) -> HubResult<()>
    where
        F: Fn(WatchEvent),
    {
        let root = self.discovery.options().root.clone();
        let root = root.canonicalize().unwrap_or(root);
        on_event(WatchEvent::WatchStarted {
            root: root.display().to_string(),
        });

        let mut cache = ModuleCache::new();
        self.reload(&live, &mut cache, &on_event)?;

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                let Ok(event) = res else {
                    return;
                };
                // Reading a file to hash it raises access events of its own
                if !matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    return;
                }
                for path in event.paths {
                    let _ = tx.send(path);
                }
            },
            Config::default(),
        )
        .map_err(|e| HubError::Watch(e.to_string()))?;
        watcher
            .watch(&root, RecursiveMode::Recursive)
            .map_err(|e| HubError::Watch(e.to_string()))?;
        info!("watching {}", root.display());

        let mut state = WatcherState::new(self.options.debounce);
        let mut content_hashes = hash_tree(&root);

        let drain_end = Instant::now() + Duration::from_millis(STARTUP_DRAIN_MS);
        while Instant::now() < drain_end {
            let _ = rx.recv_timeout(Duration::from_millis(50));
        }

        while running.load(Ordering::SeqCst) {
            if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
                if !is_hidden(&root, &path) {
                    let path = path.canonicalize().unwrap_or(path);
                    if record_change(&mut content_hashes, &path) {
                        state.add_change(path);
                    }
                }
            }

            if state.should_reload() {
                let changes = state.take_changes();
                for path in &changes {
                    debug!("changed: {}", path.display());
                    on_event(WatchEvent::FileChanged {
                        path: path.display().to_string(),
                    });
                }
                // Failure already reported through the callback
                let _ = self.reload(&live, &mut cache, &on_event);
            }
        }

        on_event(WatchEvent::Shutdown);
        Ok(())
    }
}

/// Update the tracked hashes for `path` and report whether content changed.
///
/// A directory that appears is hashed file by file. A path that is gone
/// drops its own entry and every entry below it, which covers an example
/// directory being renamed or moved away.
pub(super) fn record_change(hashes: &mut HashMap<PathBuf, ContentHash>, path: &Path) -> bool {
    if path.is_dir() {
        let mut changed = false;
        for (file, hash) in hash_tree(path) {
            changed |= hashes.insert(file, hash.clone()) != Some(hash);
        }
        return changed;
    }

    match std::fs::read(path) {
        Ok(bytes) => {
            let hash = ContentHash::from_bytes(&bytes);
            hashes.insert(path.to_path_buf(), hash.clone()) != Some(hash)
        }
        Err(_) => {
            let before = hashes.len();
            hashes.retain(|tracked, _| !tracked.starts_with(path));
            hashes.len() != before
        }
    }
}

/// Any component below the root starting with `.`
pub(super) fn is_hidden(root: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|c| match c {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}
