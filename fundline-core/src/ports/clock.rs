//! Time source port

use chrono::{DateTime, Utc};

/// Supplies the current time to the account service
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
