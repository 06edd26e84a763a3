//! Run command - replay a scenario file

use std::path::Path;

use anyhow::{Context, Result};
use fundline_core::Scenario;

use super::get_context;
use crate::output;

pub fn run(file: &Path, json: bool) -> Result<()> {
    let scenario = Scenario::load(file)
        .with_context(|| format!("Failed to load scenario {}", file.display()))?;

    let ctx = get_context()?;
    let report = ctx.scenario_service.run(&scenario)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::print_report(&report);
    Ok(())
}
