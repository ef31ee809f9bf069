use std::process::ExitCode;

use anyhow::Result;
use workerhub::{SyncDepsOptions, SyncDepsUseCase, SyncMode, TomlManifestRepository};

use super::Context;
use crate::ui::{json, render};

pub fn cmd_sync_deps(ctx: &Context, dry_run: bool, check: bool) -> Result<ExitCode> {
    let mode = if check {
        SyncMode::Check
    } else if dry_run {
        SyncMode::DryRun
    } else {
        SyncMode::Write
    };

    let deps = &ctx.config.dependencies;
    let options = SyncDepsOptions::from_config(&ctx.root, &ctx.config);
    let result = SyncDepsUseCase::new(TomlManifestRepository::new(&deps.manifest_file))
        .execute(&options, mode)?;

    if ctx.json {
        json::emit(json::command_event("sync-deps", &result))?;
    } else {
        print!("{}", render::render_sync(&result, &deps.root_manifest));
    }

    if result.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
