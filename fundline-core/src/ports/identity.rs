//! Identity verification port

/// Answers whether the party requesting a withdrawal is authorised
///
/// Implementations must not touch the account; they only look at the
/// owner's identity reference.
pub trait IdentityVerifier: Send + Sync {
    /// Returns true if the requester for `owner_identity_ref` is verified
    fn verify(&self, owner_identity_ref: &str) -> bool;
}
