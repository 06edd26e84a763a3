//! Fundline Core - account lifecycle logic
//!
//! This crate implements a single account's fund-management lifecycle
//! following hexagonal architecture:
//!
//! - **domain**: the account state machine (ACTIVE, DORMANT, CLOSED) and its errors
//! - **ports**: capability traits (IdentityVerifier, Notifier, Clock)
//! - **services**: orchestration (AccountService, LoggingService, ScenarioService)
//! - **adapters**: concrete capabilities (clocks, verifiers, notifiers)

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use config::Config;
use services::{EntryPoint, LoggingService, ScenarioService};

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{Account, AccountError, AccountStatus, Outcome};
pub use services::{AccountService, LogEntry, LogEvent, Scenario, ScenarioReport};

/// Main context for Fundline operations
///
/// Holds the configuration, the event log (when enabled) and the services
/// built on them.
pub struct FundlineContext {
    pub config: Config,
    pub logger: Option<Arc<LoggingService>>,
    pub scenario_service: ScenarioService,
}

impl FundlineContext {
    /// Create a new context rooted at `data_dir`
    pub fn new(data_dir: &Path, entry_point: EntryPoint) -> Result<Self> {
        let config = Config::load(data_dir)?;

        let logger = if config.logging_enabled {
            Some(Arc::new(LoggingService::new(
                data_dir,
                entry_point,
                env!("CARGO_PKG_VERSION"),
            )?))
        } else {
            None
        };

        let mut scenario_service = ScenarioService::new(config.clone());
        if let Some(l) = &logger {
            scenario_service = scenario_service.with_logger(Arc::clone(l));
        }

        Ok(Self {
            config,
            logger,
            scenario_service,
        })
    }
}
