//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case.

mod account;
pub mod logging;
pub mod scenario;

pub use account::AccountService;
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use scenario::{Scenario, ScenarioReport, ScenarioService, Step, StepReport};
