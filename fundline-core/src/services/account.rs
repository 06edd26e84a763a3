//! Account service - binds one account to its capabilities
//!
//! The domain `Account` is pure. This service supplies the current time from
//! the `Clock` port, asks the `IdentityVerifier` before withdrawals, fires the
//! `Notifier` on reactivation and writes each operation to the event log.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::config::Config;
use crate::domain::{Account, AccountError, AccountStatus, Outcome};
use crate::ports::{Clock, IdentityVerifier, Notifier};
use crate::services::logging::{LogEvent, LoggingService};

/// Operational surface for a single account
///
/// Methods take `&mut self`; share one across threads behind a `Mutex`.
pub struct AccountService {
    account: Account,
    dormancy_threshold: Duration,
    verifier: Arc<dyn IdentityVerifier>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    logger: Option<Arc<LoggingService>>,
}

impl AccountService {
    /// Wrap an existing account
    pub fn new(
        account: Account,
        config: &Config,
        verifier: Arc<dyn IdentityVerifier>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            account,
            dormancy_threshold: config.dormancy_threshold,
            verifier,
            notifier,
            clock,
            logger: None,
        }
    }

    /// Open a new account stamped with the clock's current time
    pub fn open(
        holder: impl Into<String>,
        owner_identity_ref: impl Into<String>,
        initial_balance: Decimal,
        config: &Config,
        verifier: Arc<dyn IdentityVerifier>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AccountError> {
        let account = Account::open(holder, owner_identity_ref, initial_balance, clock.now())?;
        Ok(Self::new(account, config, verifier, notifier, clock))
    }

    /// Attach an event log
    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.log(LogEvent::new("account_opened").with_account(self.account.id()), Some(&logger));
        self.logger = Some(logger);
        self
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn status(&self) -> AccountStatus {
        self.account.status()
    }

    pub fn balance(&self) -> Decimal {
        self.account.balance()
    }

    pub fn dormancy_threshold(&self) -> Duration {
        self.dormancy_threshold
    }

    /// Deposit funds, reactivating a dormant account
    pub fn deposit(&mut self, amount: Decimal) -> Result<Outcome, AccountError> {
        let now = self.clock.now();
        let result = self.account.deposit(amount, now);
        self.finish_funds_operation("deposit", result)
    }

    /// Withdraw funds after identity verification
    ///
    /// The verifier is only asked once the account is known to be open and
    /// the amount valid.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Outcome, AccountError> {
        let result = self.account.check_withdrawal(amount).and_then(|()| {
            let verified = self.verifier.verify(self.account.owner_identity_ref());
            let now = self.clock.now();
            self.account.withdraw(amount, verified, now)
        });
        self.finish_funds_operation("withdraw", result)
    }

    /// Close the account permanently
    pub fn close(&mut self) -> Result<(), AccountError> {
        match self.account.close() {
            Ok(()) => {
                self.record(LogEvent::new("account_closed").with_operation("close"));
                Ok(())
            }
            Err(e) => Err(self.rejected("close", e)),
        }
    }

    /// Run the dormancy check against the clock's current time
    pub fn check_dormancy(&mut self) -> Result<bool, AccountError> {
        let now = self.clock.now();
        self.check_dormancy_at(now)
    }

    /// Run the dormancy check against an explicit time
    ///
    /// Returns true if the account went from ACTIVE to DORMANT.
    pub fn check_dormancy_at(&mut self, now: DateTime<Utc>) -> Result<bool, AccountError> {
        match self.account.check_dormancy(now, self.dormancy_threshold) {
            Ok(true) => {
                self.record(LogEvent::new("account_deactivated").with_operation("check_dormancy"));
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => Err(self.rejected("check_dormancy", e)),
        }
    }

    fn finish_funds_operation(
        &mut self,
        operation: &str,
        result: Result<Outcome, AccountError>,
    ) -> Result<Outcome, AccountError> {
        let outcome = result.map_err(|e| self.rejected(operation, e))?;

        let event = if operation == "deposit" { "deposit" } else { "withdrawal" };
        self.record(LogEvent::new(event).with_operation(operation));

        if outcome.reactivated {
            self.record(LogEvent::new("account_reactivated").with_operation(operation));
            // Best-effort: the funds operation has already been applied
            if let Err(e) = self.notifier.notify_reactivation(&self.account) {
                self.record(
                    LogEvent::new("notification_failed")
                        .with_operation(operation)
                        .with_error(e.to_string()),
                );
            }
        }

        Ok(outcome)
    }

    fn rejected(&self, operation: &str, error: AccountError) -> AccountError {
        self.record(
            LogEvent::new("operation_rejected")
                .with_operation(operation)
                .with_error(error.to_string())
                .with_error_details(error.kind()),
        );
        error
    }

    fn record(&self, event: LogEvent) {
        self.log(event.with_account(self.account.id()), self.logger.as_ref());
    }

    /// Write to the event log, ignoring failures (logging never breaks an operation)
    fn log(&self, event: LogEvent, logger: Option<&Arc<LoggingService>>) {
        if let Some(l) = logger {
            let _ = l.log(event);
        }
    }
}
