use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context as _, Result};
use workerhub::{LiveRouteTable, WatchEvent, WatchOptions, WatchUseCase};

use super::Context;
use crate::ui::render;

pub fn cmd_watch(ctx: &Context) -> Result<ExitCode> {
    let options = WatchOptions::default()
        .with_debounce_ms(ctx.config.watch.debounce_ms)
        .with_json(ctx.json);
    let watch = WatchUseCase::new(ctx.discovery(), options);

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    let live = Arc::new(LiveRouteTable::default());
    let json = ctx.json;
    watch.start(live, running, |event| {
        if json {
            println!("{}", event.to_json());
            return;
        }
        let rendered = render::render_watch_event(&timestamp(), &event);
        match event {
            WatchEvent::Error { .. } => eprint!("{rendered}"),
            _ => print!("{rendered}"),
        }
    })?;

    Ok(ExitCode::SUCCESS)
}

fn timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 86_400;
            format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
        })
        .unwrap_or_else(|_| "00:00:00".to_string())
}
