//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - system and manual clocks for the Clock port
//! - fixed, allow-list and switchable verifiers for IdentityVerifier
//! - event-log, console and in-memory notifiers for Notifier

pub mod clock;
pub mod notifier;
pub mod verifier;

pub use clock::{ManualClock, SystemClock};
pub use notifier::{ConsoleNotifier, LogNotifier, MemoryNotifier};
pub use verifier::{AllowListVerifier, StaticVerifier, SwitchVerifier};
