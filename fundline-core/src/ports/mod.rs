//! Port definitions (hexagonal architecture)
//!
//! Ports define the capabilities the account service consumes. The service
//! depends only on these traits, not on concrete implementations.

mod clock;
mod identity;
mod notifier;

pub use clock::Clock;
pub use identity::IdentityVerifier;
pub use notifier::Notifier;
