//! Config command - show and change settings

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use fundline_core::config::Config;

use super::get_data_dir;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the inactivity period before an account goes dormant
    SetDormancy {
        /// Threshold in seconds
        seconds: i64,
    },
    /// Turn the event log on or off
    SetLogging {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let data_dir = get_data_dir()?;
    std::fs::create_dir_all(&data_dir)?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&data_dir)?;
            let seconds = config.dormancy_threshold.num_seconds();

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "data_dir": data_dir.to_string_lossy(),
                        "dormancy_threshold_seconds": seconds,
                        "logging_enabled": config.logging_enabled,
                    })
                );
                return Ok(());
            }

            println!("{}", "Settings".bold());
            println!("  Data directory: {}", data_dir.display());
            println!(
                "  Dormancy threshold: {}s ({} days)",
                seconds,
                config.dormancy_threshold.num_days()
            );
            println!("  Event log: {}", if config.logging_enabled { "on" } else { "off" });
        }
        ConfigCommands::SetDormancy { seconds } => {
            let mut config = Config::load(&data_dir)?;
            config.set_dormancy_seconds(seconds)?;
            config.save(&data_dir)?;
            output::success(&format!("Dormancy threshold set to {}s", seconds));
        }
        ConfigCommands::SetLogging { enabled } => {
            let mut config = Config::load(&data_dir)?;
            config.logging_enabled = enabled;
            config.save(&data_dir)?;
            output::success(&format!(
                "Event log {}",
                if enabled { "enabled" } else { "disabled" }
            ));
        }
    }

    Ok(())
}
