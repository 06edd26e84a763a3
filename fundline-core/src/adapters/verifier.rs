//! Identity verifier adapters
//!
//! None of these talk to a real identity provider. They cover the cases a
//! wrapping application needs: a fixed answer, a known set of verified
//! owners, and an answer that can be flipped between requests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::ports::IdentityVerifier;

/// Always gives the same answer
#[derive(Debug, Clone, Copy)]
pub struct StaticVerifier(pub bool);

impl IdentityVerifier for StaticVerifier {
    fn verify(&self, _owner_identity_ref: &str) -> bool {
        self.0
    }
}

/// Verifies the owners it has been told about
#[derive(Debug, Default)]
pub struct AllowListVerifier {
    verified: RwLock<HashSet<String>>,
}

impl AllowListVerifier {
    pub fn new<I, S>(refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            verified: RwLock::new(refs.into_iter().map(Into::into).collect()),
        }
    }

    pub fn grant(&self, owner_identity_ref: impl Into<String>) {
        let mut verified = self.verified.write().unwrap_or_else(|e| e.into_inner());
        verified.insert(owner_identity_ref.into());
    }

    pub fn revoke(&self, owner_identity_ref: &str) {
        let mut verified = self.verified.write().unwrap_or_else(|e| e.into_inner());
        verified.remove(owner_identity_ref);
    }
}

impl IdentityVerifier for AllowListVerifier {
    fn verify(&self, owner_identity_ref: &str) -> bool {
        self.verified
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains(owner_identity_ref)
    }
}

/// Answer set by the caller before each request
///
/// Scenario replay uses this to model "this withdrawal was verified" per step.
#[derive(Debug, Default)]
pub struct SwitchVerifier {
    verified: AtomicBool,
}

impl SwitchVerifier {
    pub fn new(verified: bool) -> Self {
        Self {
            verified: AtomicBool::new(verified),
        }
    }

    pub fn set_verified(&self, verified: bool) {
        self.verified.store(verified, Ordering::SeqCst);
    }
}

impl IdentityVerifier for SwitchVerifier {
    fn verify(&self, _owner_identity_ref: &str) -> bool {
        self.verified.load(Ordering::SeqCst)
    }
}
