//! Reactivation notification port

use anyhow::Result;

use crate::domain::Account;

/// Receives a message when a dormant account becomes active again
///
/// Delivery is best-effort. An `Err` is logged by the caller and never
/// undoes the deposit or withdrawal that triggered it.
pub trait Notifier: Send + Sync {
    /// Called once per DORMANT -> ACTIVE transition, after the funds
    /// operation has been applied
    fn notify_reactivation(&self, account: &Account) -> Result<()>;
}
