use std::process::ExitCode;

use anyhow::{Context as _, Result};
use serde_json::Value;
use workerhub::HttpMethod;

use super::Context;

pub fn cmd_call(ctx: &Context, method: &str, path: &str, data: Option<&str>) -> Result<ExitCode> {
    let method: HttpMethod = method.parse()?;
    let payload = match data {
        Some(raw) => serde_json::from_str(raw).context("--data is not valid JSON")?,
        None => Value::Null,
    };

    let composition = ctx.discovery().run()?;
    let response = composition.table.dispatch(method, path, payload)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(ExitCode::SUCCESS)
}
