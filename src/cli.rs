use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// workerhub - discover worker examples and serve them as one route table
#[derive(Parser, Debug)]
#[command(name = "workerhub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Examples root holding the category directories
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Mount at /{example}/{worker_type} (drop the category segment)
    #[arg(long, global = true)]
    pub flatten: bool,

    /// Output format for CI (NDJSON for watch)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one discovery pass and print the mounted routes
    Routes {
        /// Exit non-zero when discovery reported any warning
        #[arg(long)]
        strict: bool,
    },

    /// Watch the examples and rebuild the route table on every change
    Watch,

    /// Consolidate example dependencies into the root manifest
    SyncDeps {
        /// Show the manifest diff without writing it
        #[arg(long, conflicts_with = "check")]
        dry_run: bool,

        /// Exit non-zero when the root manifest is out of date
        #[arg(long)]
        check: bool,
    },

    /// Dispatch one request through a freshly composed route table
    Call {
        /// HTTP method, e.g. GET or POST
        method: String,

        /// Request path, e.g. /01_getting_started/hello/gpu/hello
        path: String,

        /// JSON payload passed to the handler
        #[arg(short, long)]
        data: Option<String>,
    },
}
