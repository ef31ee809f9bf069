use std::process::ExitCode;

use anyhow::Result;

use super::Context;
use crate::ui::{json, render};

pub fn cmd_routes(ctx: &Context, strict: bool) -> Result<ExitCode> {
    let composition = ctx.discovery().run()?;
    let (table, report) = (&composition.table, &composition.report);

    if ctx.json {
        json::emit(render::routes_json(table, report))?;
    } else {
        print!("{}", render::render_routes(table, report));
    }

    if strict && report.has_warnings() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
