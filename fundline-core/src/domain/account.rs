//! Account domain model
//!
//! The account is a three-state machine (ACTIVE, DORMANT, CLOSED). It never
//! reads a clock: every operation that needs the current time takes it as an
//! argument, and the dormancy check is driven by the caller.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::result::AccountError;

/// Holder name used when none is given
pub const DEFAULT_HOLDER: &str = "Unknown";

/// Lifecycle state of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Dormant,
    Closed,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Dormant => "DORMANT",
            AccountStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful deposit or withdrawal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Balance after the operation
    pub balance: Decimal,
    /// True if the operation moved the account out of DORMANT
    pub reactivated: bool,
}

/// A single customer account
///
/// Fields are private so the invariants hold: the balance is never negative,
/// a closed account never changes, and `last_activity_time` only moves when
/// a deposit or withdrawal succeeds.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    id: Uuid,
    holder: String,
    owner_identity_ref: String,
    balance: Decimal,
    status: AccountStatus,
    last_activity_time: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Create an empty, active account
    pub fn new(
        holder: impl Into<String>,
        owner_identity_ref: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            holder: holder.into(),
            owner_identity_ref: owner_identity_ref.into(),
            balance: Decimal::ZERO,
            status: AccountStatus::Active,
            last_activity_time: now,
            created_at: now,
        }
    }

    /// Create an active account with an initial funding amount
    ///
    /// Zero is accepted; a negative amount is rejected with `InvalidAmount`.
    pub fn open(
        holder: impl Into<String>,
        owner_identity_ref: impl Into<String>,
        initial_balance: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Self, AccountError> {
        if initial_balance < Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        let mut account = Self::new(holder, owner_identity_ref, now);
        account.balance = initial_balance;
        Ok(account)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn owner_identity_ref(&self) -> &str {
        &self.owner_identity_ref
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn last_activity_time(&self) -> DateTime<Utc> {
        self.last_activity_time
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    pub fn is_dormant(&self) -> bool {
        self.status == AccountStatus::Dormant
    }

    pub fn is_closed(&self) -> bool {
        self.status == AccountStatus::Closed
    }

    /// Deposit funds
    ///
    /// Allowed in ACTIVE and DORMANT. A deposit into a dormant account
    /// reactivates it. A deposit the balance cannot represent is refused
    /// with `InvalidAmount`.
    pub fn deposit(&mut self, amount: Decimal, now: DateTime<Utc>) -> Result<Outcome, AccountError> {
        self.ensure_open()?;
        validate_amount(amount)?;
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::InvalidAmount)?;

        self.balance = balance;
        let reactivated = self.record_activity(now);
        Ok(Outcome {
            balance: self.balance,
            reactivated,
        })
    }

    /// Checks a withdrawal could proceed before identity is consulted
    ///
    /// Covers the checks that do not depend on verification: the account
    /// must be open and the amount positive.
    pub fn check_withdrawal(&self, amount: Decimal) -> Result<(), AccountError> {
        self.ensure_open()?;
        validate_amount(amount)
    }

    /// Withdraw funds
    ///
    /// `verified` is the identity verifier's answer for this request. Checks
    /// run in order: closed, amount, identity, funds.
    pub fn withdraw(
        &mut self,
        amount: Decimal,
        verified: bool,
        now: DateTime<Utc>,
    ) -> Result<Outcome, AccountError> {
        self.check_withdrawal(amount)?;
        if !verified {
            return Err(AccountError::IdentityNotVerified);
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds);
        }

        self.balance -= amount;
        let reactivated = self.record_activity(now);
        Ok(Outcome {
            balance: self.balance,
            reactivated,
        })
    }

    /// Close the account permanently
    ///
    /// The balance is left as is; CLOSED is a logical state, not a payout.
    pub fn close(&mut self) -> Result<(), AccountError> {
        if self.is_closed() {
            return Err(AccountError::AlreadyClosed);
        }
        self.status = AccountStatus::Closed;
        Ok(())
    }

    /// Move an idle ACTIVE account to DORMANT
    ///
    /// Returns true if the transition happened. The account goes dormant only
    /// when more than `threshold` has passed since the last activity.
    pub fn check_dormancy(
        &mut self,
        now: DateTime<Utc>,
        threshold: Duration,
    ) -> Result<bool, AccountError> {
        self.ensure_open()?;
        if !self.is_active() {
            return Ok(false);
        }
        if self.idle_for(now) > threshold {
            self.status = AccountStatus::Dormant;
            return Ok(true);
        }
        Ok(false)
    }

    /// Time since the last successful deposit or withdrawal
    pub fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.last_activity_time)
    }

    fn ensure_open(&self) -> Result<(), AccountError> {
        if self.is_closed() {
            return Err(AccountError::AccountClosed);
        }
        Ok(())
    }

    /// Stamp a successful funds operation; returns true when it left DORMANT
    fn record_activity(&mut self, now: DateTime<Utc>) -> bool {
        self.last_activity_time = now;
        if self.is_dormant() {
            self.status = AccountStatus::Active;
            return true;
        }
        false
    }
}

fn validate_amount(amount: Decimal) -> Result<(), AccountError> {
    if amount <= Decimal::ZERO {
        return Err(AccountError::InvalidAmount);
    }
    Ok(())
}
