//! CLI command implementations

pub mod config;
pub mod demo;
pub mod logs;
pub mod run;

use std::path::PathBuf;

use anyhow::{Context, Result};
use fundline_core::services::EntryPoint;
use fundline_core::FundlineContext;

/// Get the data directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("FUNDLINE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".fundline"))
        .context("Could not find home directory")
}

/// Get or create the fundline context
pub fn get_context() -> Result<FundlineContext> {
    let data_dir = get_data_dir()?;

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    FundlineContext::new(&data_dir, EntryPoint::Cli).context("Failed to initialize fundline context")
}
