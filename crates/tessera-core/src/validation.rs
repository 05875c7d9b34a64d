//! Event validation: id-hash and signature checks.
//!
//! Two shapes of the same check:
//! - [`has_valid_signature`] is a total predicate for feed filtering; failures
//!   are reported through `tracing` and never raised.
//! - [`check_signature`] is the strict trust-boundary check, with distinct
//!   errors for a wrong id and a bad signature.

use crate::crypto;
use crate::error::ValidationError;
use crate::event::Event;

/// True when the stated id equals the canonical hash of the fields.
pub fn has_correct_id_hash(event: &Event) -> bool {
    *event.id() == event.compute_id()
}

/// True when the signature verifies against the stated id and author.
///
/// Does not check that the id is correct.
pub fn has_verified_signature(event: &Event) -> bool {
    crypto::verify(event.sig(), event.id(), event.pubkey())
}

/// Id check first, then signature. Never panics.
pub fn has_valid_signature(event: &Event) -> bool {
    match check_signature(event) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(id = %event.id(), error = %e, "event failed validation");
            false
        }
    }
}

/// Strict check: the id must match the fields and the signature must verify.
pub fn check_signature(event: &Event) -> Result<(), ValidationError> {
    // 1. Recompute the id
    let computed = event.compute_id();
    if computed != *event.id() {
        return Err(ValidationError::IdentityMismatch {
            stated: *event.id(),
            computed,
        });
    }

    // 2. Verify the signature over it
    event.pubkey().verify(event.id(), event.sig())
}
