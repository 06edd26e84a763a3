//! Result and error types for the core library

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons an account operation is refused
///
/// A refused operation never mutates the account.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountError {
    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Identity not verified")]
    IdentityNotVerified,

    #[error("Account is closed")]
    AccountClosed,

    #[error("Account is already closed")]
    AlreadyClosed,

    #[error("Amount must be positive")]
    InvalidAmount,
}

impl AccountError {
    /// Stable machine-readable name, used in logs and JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            AccountError::InsufficientFunds => "insufficient_funds",
            AccountError::IdentityNotVerified => "identity_not_verified",
            AccountError::AccountClosed => "account_closed",
            AccountError::AlreadyClosed => "already_closed",
            AccountError::InvalidAmount => "invalid_amount",
        }
    }
}

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a scenario error
    pub fn scenario(msg: impl Into<String>) -> Self {
        Self::Scenario(msg.into())
    }

    /// The account refusal behind this error, if any
    pub fn as_account_error(&self) -> Option<AccountError> {
        match self {
            Error::Account(e) => Some(*e),
            _ => None,
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result with optional context (for JSON output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            context: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: None,
        }
    }

    /// Attach one context entry
    pub fn with_context(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.context
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }
}

impl<T> From<std::result::Result<T, AccountError>> for OperationResult<T> {
    fn from(result: std::result::Result<T, AccountError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e.to_string())
                .with_context("kind", serde_json::Value::from(e.kind())),
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e.to_string()),
        }
    }
}
