//! Scenario service - replay a scripted account history
//!
//! A scenario opens one account and applies a list of steps against it,
//! with a manual clock standing in for elapsed time and a switchable
//! verifier standing in for per-request identity checks.
//!
//! ```json
//! {
//!   "holder": "Saka",
//!   "initialBalance": "100",
//!   "dormancyThresholdSeconds": 10,
//!   "steps": [
//!     { "op": "deposit", "amount": "50" },
//!     { "op": "withdraw", "amount": "30", "verified": true },
//!     { "op": "advance", "seconds": 11 },
//!     { "op": "check_dormancy" },
//!     { "op": "close" }
//!   ]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::adapters::{ManualClock, MemoryNotifier, SwitchVerifier, SystemClock};
use crate::config::Config;
use crate::domain::result::{Error, OperationResult, Result};
use crate::domain::{AccountStatus, DEFAULT_HOLDER};
use crate::ports::Clock;
use crate::services::account::AccountService;
use crate::services::logging::LoggingService;

/// One scripted operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Deposit {
        amount: Decimal,
    },
    Withdraw {
        amount: Decimal,
        #[serde(default = "default_verified")]
        verified: bool,
    },
    /// Move the scenario clock forward
    Advance {
        seconds: i64,
    },
    CheckDormancy,
    Close,
}

fn default_verified() -> bool {
    true
}

impl Step {
    pub fn label(&self) -> String {
        match self {
            Step::Deposit { amount } => format!("deposit {}", amount),
            Step::Withdraw { amount, verified: true } => format!("withdraw {} (verified)", amount),
            Step::Withdraw { amount, verified: false } => format!("withdraw {} (unverified)", amount),
            Step::Advance { seconds } => format!("wait {}s", seconds),
            Step::CheckDormancy => "check dormancy".to_string(),
            Step::Close => "close".to_string(),
        }
    }
}

/// A scripted account history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default = "default_holder")]
    pub holder: String,
    /// Defaults to the holder name
    #[serde(default)]
    pub identity_ref: Option<String>,
    #[serde(default)]
    pub initial_balance: Decimal,
    /// Overrides the configured threshold for this run
    #[serde(default)]
    pub dormancy_threshold_seconds: Option<i64>,
    /// Scenario clock start; defaults to the current time
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    pub steps: Vec<Step>,
}

fn default_holder() -> String {
    DEFAULT_HOLDER.to_string()
}

impl Scenario {
    /// Parse a scenario from JSON text
    pub fn parse(json: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Read and parse a scenario file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Reject scenarios that cannot be replayed
    pub fn validate(&self) -> Result<()> {
        if let Some(seconds) = self.dormancy_threshold_seconds {
            if seconds < 0 {
                return Err(Error::scenario("dormancyThresholdSeconds cannot be negative"));
            }
        }
        let mut at = self.start;
        for (index, step) in self.steps.iter().enumerate() {
            if let Step::Advance { seconds } = step {
                let out_of_range = || {
                    Error::scenario(format!(
                        "step {}: cannot advance the clock by {} seconds",
                        index + 1,
                        seconds
                    ))
                };
                if *seconds < 0 {
                    return Err(out_of_range());
                }
                let by = Duration::try_seconds(*seconds).ok_or_else(out_of_range)?;
                // Only a fixed start can be checked ahead of the run
                if let Some(t) = at {
                    at = Some(t.checked_add_signed(by).ok_or_else(out_of_range)?);
                }
            }
        }
        Ok(())
    }

    /// The walkthrough: fund, spend, idle into dormancy, come back, close
    pub fn demo() -> Self {
        Self {
            holder: "Saka".to_string(),
            identity_ref: None,
            initial_balance: Decimal::from(100),
            dormancy_threshold_seconds: Some(10),
            start: None,
            steps: vec![
                Step::Deposit { amount: Decimal::from(50) },
                Step::Withdraw { amount: Decimal::from(30), verified: true },
                Step::Withdraw { amount: Decimal::from(10), verified: false },
                Step::Withdraw { amount: Decimal::from(200), verified: true },
                Step::Advance { seconds: 11 },
                Step::CheckDormancy,
                Step::Withdraw { amount: Decimal::from(10), verified: false },
                Step::Deposit { amount: Decimal::from(10) },
                Step::Close,
                Step::Deposit { amount: Decimal::from(5) },
                Step::Close,
            ],
        }
    }
}

/// What happened at one step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// 1-based position in the scenario
    pub index: usize,
    pub step: Step,
    pub label: String,
    pub result: OperationResult<String>,
    pub status: AccountStatus,
    pub balance: Decimal,
    /// Reactivation notifications sent so far
    pub notifications: usize,
    pub at: DateTime<Utc>,
}

/// Outcome of a whole replay
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub account_id: Uuid,
    pub holder: String,
    pub dormancy_threshold_seconds: i64,
    pub steps: Vec<StepReport>,
    pub final_status: AccountStatus,
    pub final_balance: Decimal,
    pub notifications: usize,
}

impl ScenarioReport {
    /// Number of steps that were refused
    pub fn rejected(&self) -> usize {
        self.steps.iter().filter(|s| !s.result.success).count()
    }
}

/// Replays scenarios against a fresh account
pub struct ScenarioService {
    config: Config,
    logger: Option<Arc<LoggingService>>,
}

impl ScenarioService {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            logger: None,
        }
    }

    /// Write account events from replays to this log
    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Replay a scenario step by step
    ///
    /// Refused operations are reported per step and do not stop the replay.
    pub fn run(&self, scenario: &Scenario) -> Result<ScenarioReport> {
        scenario.validate()?;

        let mut config = self.config.clone();
        if let Some(seconds) = scenario.dormancy_threshold_seconds {
            config
                .set_dormancy_seconds(seconds)
                .map_err(|e| Error::scenario(e.to_string()))?;
        }

        let clock = Arc::new(ManualClock::new(scenario.start.unwrap_or_else(|| SystemClock.now())));
        let verifier = Arc::new(SwitchVerifier::new(true));
        let notifier = Arc::new(MemoryNotifier::new());

        let identity_ref = scenario
            .identity_ref
            .clone()
            .unwrap_or_else(|| scenario.holder.clone());
        let mut service = AccountService::open(
            scenario.holder.clone(),
            identity_ref,
            scenario.initial_balance,
            &config,
            verifier.clone(),
            notifier.clone(),
            clock.clone(),
        )?;
        if let Some(logger) = &self.logger {
            service = service.with_logger(Arc::clone(logger));
        }

        let mut steps = Vec::with_capacity(scenario.steps.len());
        for (i, step) in scenario.steps.iter().enumerate() {
            let result = apply_step(&mut service, &clock, &verifier, step);
            steps.push(StepReport {
                index: i + 1,
                step: step.clone(),
                label: step.label(),
                result,
                status: service.status(),
                balance: service.balance(),
                notifications: notifier.count(),
                at: clock.now(),
            });
        }

        Ok(ScenarioReport {
            account_id: service.account().id(),
            holder: service.account().holder().to_string(),
            dormancy_threshold_seconds: service.dormancy_threshold().num_seconds(),
            steps,
            final_status: service.status(),
            final_balance: service.balance(),
            notifications: notifier.count(),
        })
    }
}

fn apply_step(
    service: &mut AccountService,
    clock: &ManualClock,
    verifier: &SwitchVerifier,
    step: &Step,
) -> OperationResult<String> {
    match step {
        Step::Deposit { amount } => service
            .deposit(*amount)
            .map(|o| describe_funds("deposited", *amount, o.reactivated))
            .into(),
        Step::Withdraw { amount, verified } => {
            verifier.set_verified(*verified);
            service
                .withdraw(*amount)
                .map(|o| describe_funds("withdrew", *amount, o.reactivated))
                .into()
        }
        Step::Advance { seconds } => {
            let moved = Duration::try_seconds(*seconds).is_some_and(|by| clock.advance(by));
            if moved {
                OperationResult::ok(format!("clock moved {}s", seconds))
            } else {
                OperationResult::fail(format!("cannot move the clock by {}s", seconds))
            }
        }
        Step::CheckDormancy => service
            .check_dormancy()
            .map(|went_dormant| {
                if went_dormant {
                    "account went dormant".to_string()
                } else {
                    "no change".to_string()
                }
            })
            .into(),
        Step::Close => service.close().map(|()| "account closed".to_string()).into(),
    }
}

fn describe_funds(verb: &str, amount: Decimal, reactivated: bool) -> String {
    if reactivated {
        format!("{} {}, account reactivated", verb, amount)
    } else {
        format!("{} {}", verb, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let scenario = Scenario::parse(
            r#"{
                "initialBalance": 100,
                "steps": [
                    {"op": "deposit", "amount": "12.50"},
                    {"op": "withdraw", "amount": 3},
                    {"op": "withdraw", "amount": 3, "verified": false},
                    {"op": "advance", "seconds": 5},
                    {"op": "check_dormancy"},
                    {"op": "close"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scenario.holder, "Unknown");
        assert_eq!(scenario.initial_balance, Decimal::from(100));
        assert_eq!(scenario.steps[0], Step::Deposit { amount: Decimal::new(1250, 2) });
        assert_eq!(
            scenario.steps[1],
            Step::Withdraw { amount: Decimal::from(3), verified: true }
        );
        assert_eq!(
            scenario.steps[2],
            Step::Withdraw { amount: Decimal::from(3), verified: false }
        );
        assert_eq!(scenario.steps[5], Step::Close);
    }

    #[test]
    fn test_negative_advance_rejected() {
        let err = Scenario::parse(r#"{"steps": [{"op": "advance", "seconds": -1}]}"#).unwrap_err();
        assert!(matches!(err, Error::Scenario(_)));
    }

    #[test]
    fn test_advance_past_date_range_rejected_with_fixed_start() {
        let err = Scenario::parse(
            r#"{"start": "2025-01-01T00:00:00Z",
                "steps": [{"op": "advance", "seconds": 9000000000000}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Scenario(_)));
    }

    #[test]
    fn test_unreachable_advance_fails_the_step() {
        let scenario = Scenario {
            holder: "Saka".to_string(),
            identity_ref: None,
            initial_balance: Decimal::from(100),
            dormancy_threshold_seconds: Some(10),
            start: None,
            steps: vec![
                Step::Advance { seconds: 9_000_000_000_000 },
                Step::CheckDormancy,
            ],
        };
        let report = ScenarioService::new(Config::default()).run(&scenario).unwrap();

        let advance = &report.steps[0];
        assert!(!advance.result.success);
        assert_eq!(
            advance.result.error,
            Some("cannot move the clock by 9000000000000s".to_string())
        );
        assert_eq!(report.steps[1].at, advance.at);
        assert_eq!(report.steps[1].result.data, Some("no change".to_string()));
        assert_eq!(report.final_status, AccountStatus::Active);
        assert_eq!(report.rejected(), 1);
    }

    #[test]
    fn test_unknown_op_rejected() {
        let err = Scenario::parse(r#"{"steps": [{"op": "transfer"}]}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_negative_initial_balance_rejected() {
        let scenario = Scenario::parse(r#"{"initialBalance": -5, "steps": []}"#).unwrap();
        let err = ScenarioService::new(Config::default()).run(&scenario).unwrap_err();
        assert_eq!(err.as_account_error(), Some(crate::domain::AccountError::InvalidAmount));
    }

    #[test]
    fn test_demo_scenario() {
        let report = ScenarioService::new(Config::default())
            .run(&Scenario::demo())
            .unwrap();

        let balances: Vec<Decimal> = report.steps.iter().map(|s| s.balance).collect();
        let expected: Vec<Decimal> = [150, 120, 120, 120, 120, 120, 120, 130, 130, 130, 130]
            .into_iter()
            .map(Decimal::from)
            .collect();
        assert_eq!(balances, expected);

        assert_eq!(report.steps[5].status, AccountStatus::Dormant);
        assert_eq!(report.steps[6].status, AccountStatus::Dormant);
        assert_eq!(report.steps[6].notifications, 0);
        assert_eq!(report.steps[7].status, AccountStatus::Active);
        assert_eq!(report.steps[7].notifications, 1);

        assert_eq!(report.final_status, AccountStatus::Closed);
        assert_eq!(report.notifications, 1);
        // unverified x2, insufficient funds, deposit after close, second close
        assert_eq!(report.rejected(), 5);
        let last = report.steps.last().unwrap();
        assert_eq!(last.result.error, Some("Account is already closed".to_string()));
    }
}
