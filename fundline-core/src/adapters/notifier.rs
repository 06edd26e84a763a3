//! Notifier adapters

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use uuid::Uuid;

use crate::domain::Account;
use crate::ports::Notifier;
use crate::services::logging::{LogEvent, LoggingService};

/// Records each reactivation in the event log
pub struct LogNotifier {
    logger: Arc<LoggingService>,
}

impl LogNotifier {
    pub fn new(logger: Arc<LoggingService>) -> Self {
        Self { logger }
    }
}

impl Notifier for LogNotifier {
    fn notify_reactivation(&self, account: &Account) -> Result<()> {
        self.logger.log(
            LogEvent::new("reactivation_notice")
                .with_account(account.id())
                .with_operation("notify"),
        )
    }
}

/// Prints a line to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify_reactivation(&self, account: &Account) -> Result<()> {
        println!("Account for {} has been reactivated.", account.holder());
        Ok(())
    }
}

/// Keeps the ids of reactivated accounts in memory
///
/// `failing()` builds one that records the attempt and then reports an
/// error, for exercising the best-effort contract.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<Uuid>>,
    fail: bool,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Number of notifications received so far
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn sent(&self) -> Vec<Uuid> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify_reactivation(&self, account: &Account) -> Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(account.id());
        if self.fail {
            return Err(anyhow!("notification channel unavailable"));
        }
        Ok(())
    }
}
