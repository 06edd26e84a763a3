//! Demo command - run the built-in walkthrough

use anyhow::Result;
use fundline_core::Scenario;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let report = ctx.scenario_service.run(&Scenario::demo())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::print_report(&report);
    Ok(())
}
