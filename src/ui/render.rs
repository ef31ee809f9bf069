//! Plain-text views

use std::fmt::Write as _;

use serde_json::{json, Value};
use workerhub::domain::value_objects::Severity;
use workerhub::{DiscoveryReport, RouteTable, SyncDepsResult, SyncMode, WatchEvent};

/// Mounted routes grouped by prefix, then the pass summary and issues
pub fn render_routes(table: &RouteTable, report: &DiscoveryReport) -> String {
    let mut out = String::new();
    for mount in table.mounts() {
        let _ = writeln!(out, "{}  [{}]", mount.prefix, mount.tag);
        for route in &mount.routes {
            let _ = writeln!(
                out,
                "  {:<7} {}  {}",
                route.method.as_str(),
                route.path,
                route.handler.name()
            );
        }
    }
    if table.is_empty() {
        out.push_str("No routes mounted.\n");
    }

    let _ = writeln!(
        out,
        "\n{} router(s), {} route(s) from {} example(s)",
        report.mounted_routers, report.routes, report.examples_scanned
    );
    render_issues(&mut out, report);
    out
}

fn render_issues(out: &mut String, report: &DiscoveryReport) {
    for issue in &report.issues {
        let label = match issue.severity() {
            Severity::Info => "info",
            Severity::Warning => "warning",
        };
        let _ = writeln!(out, "{}: {}", label, issue);
    }
}

/// JSON document for `routes --json`
pub fn routes_json(table: &RouteTable, report: &DiscoveryReport) -> Value {
    let routes: Vec<Value> = table
        .routes()
        .map(|(mount, route)| {
            json!({
                "method": route.method,
                "path": route.path,
                "prefix": mount.prefix.prefix,
                "tag": mount.tag,
                "handler": route.handler.name(),
                "tags": route.tags,
            })
        })
        .collect();
    json!({
        "command": "routes",
        "routes": routes,
        "report": report,
    })
}

pub fn render_sync(result: &SyncDepsResult, manifest: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} package(s) from {} manifest(s) across {} example(s)",
        result.packages, result.manifests_read, result.examples_scanned
    );
    for warning in &result.warnings {
        let _ = writeln!(out, "warning: {}", warning);
    }
    for conflict in &result.conflicts {
        let _ = writeln!(
            out,
            "conflict: {} ({}) declared by {}",
            conflict.package,
            conflict.constraints.join(", "),
            conflict.examples.join(", ")
        );
    }

    let status = match (result.mode, result.changed) {
        (_, false) => format!("{} is up to date", manifest),
        (SyncMode::Write, true) => format!("updated {}", manifest),
        (SyncMode::DryRun, true) => format!("{} would change (dry run)", manifest),
        (SyncMode::Check, true) => {
            format!("{} is out of date; run 'workerhub sync-deps'", manifest)
        }
    };
    if let Some(diff) = &result.diff {
        out.push_str(diff);
    }
    let _ = writeln!(out, "{}", status);
    out
}

pub fn render_watch_event(timestamp: &str, event: &WatchEvent) -> String {
    let line = match event {
        WatchEvent::WatchStarted { root } => format!("watching {}", root),
        WatchEvent::FileChanged { path } => format!("changed {}", path),
        WatchEvent::ReloadStarted => "reloading".to_string(),
        WatchEvent::ReloadComplete {
            mounted,
            routes,
            reloaded,
            warnings,
        } => format!(
            "mounted {} router(s), {} route(s); {} module(s) reloaded, {} warning(s)",
            mounted, routes, reloaded, warnings
        ),
        WatchEvent::Error { message } => format!("reload failed: {}", message),
        WatchEvent::Shutdown => "stopped".to_string(),
    };
    format!("[{}] {}\n", timestamp, line)
}
