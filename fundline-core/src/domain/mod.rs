//! Core domain entities
//!
//! The account state machine and its error kinds. Pure data and rules,
//! no I/O and no clock.

mod account;
pub mod result;

pub use account::{Account, AccountStatus, Outcome, DEFAULT_HOLDER};
pub use result::AccountError;
