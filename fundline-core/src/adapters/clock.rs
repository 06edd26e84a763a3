//! Clock adapters

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::ports::Clock;

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to
///
/// Used by scenario replay and tests to simulate inactivity without waiting.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward (or backward, for a negative duration)
    ///
    /// Returns false, leaving the clock where it was, when the move would
    /// leave the representable date range.
    pub fn advance(&self, by: Duration) -> bool {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        match now.checked_add_signed(by) {
            Some(next) => {
                *now = next;
                true
            }
            None => false,
        }
    }

    pub fn set(&self, to: DateTime<Utc>) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_advances() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        assert!(clock.advance(Duration::seconds(11)));
        assert_eq!(clock.now(), start + Duration::seconds(11));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_manual_clock_refuses_out_of_range_move() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        assert!(!clock.advance(Duration::seconds(9_000_000_000_000)));
        assert_eq!(clock.now(), start);
    }
}
