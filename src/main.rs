//! workerhub CLI
//!
//! Usage: workerhub [--root DIR] <COMMAND>
//!
//! Commands:
//!   routes     Run one discovery pass and print the mounted routes
//!   watch      Rebuild the route table whenever an example changes
//!   sync-deps  Consolidate example dependencies into the root manifest
//!   call       Dispatch one request through the composed table

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, warn};

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};
use commands::Context;
use workerhub::config::Config;
use workerhub::logging::init_logging;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (config, source, warnings) = Config::discover(&cli.root)?;
    let mut config = config.with_env_overrides();
    if cli.flatten {
        config.discovery.flatten = true;
    }

    init_logging(cli.verbose, config.log.filter.as_deref());
    match &source {
        Some(path) => debug!("loaded config from {}", path.display()),
        None => debug!("no config file found, using defaults"),
    }
    for warning in &warnings {
        warn!("{}", warning);
    }

    let ctx = Context {
        root: cli.root,
        config,
        json: cli.json,
    };

    match cli.command {
        Commands::Routes { strict } => commands::routes::cmd_routes(&ctx, strict),
        Commands::Watch => commands::watch::cmd_watch(&ctx),
        Commands::SyncDeps { dry_run, check } => {
            commands::sync_deps::cmd_sync_deps(&ctx, dry_run, check)
        }
        Commands::Call { method, path, data } => {
            commands::call::cmd_call(&ctx, &method, &path, data.as_deref())
        }
    }
}
