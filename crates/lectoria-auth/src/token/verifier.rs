//! Signature and expiry verification for decoded tokens.

use chrono::{DateTime, Utc};
use hmac::Mac;
use thiserror::Error;

use super::codec::{DecodedToken, canonical_payload, mac};

/// Why a decoded token failed verification.
///
/// The two cases are deliberately distinct: `Expired` lets callers ask the
/// user to re-authenticate, while `SignatureInvalid` means the token was
/// forged or signed by a foreign authority.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    /// The signature does not match a digest recomputed with our key.
    #[error("token signature is invalid")]
    SignatureInvalid,
    /// The signature is fine but the validity window has closed.
    #[error("token has expired")]
    Expired,
}

/// Verify a decoded token's signature and time validity.
///
/// The digest is recomputed over the same canonical payload used at encode
/// time and compared in constant time. Expiry is checked independently:
/// a correctly signed token presented at or after `expires_at` is
/// [`VerifyError::Expired`].
pub fn verify(token: &DecodedToken, secret: &str, now: DateTime<Utc>) -> Result<(), VerifyError> {
    let payload = canonical_payload(&token.claims);

    // verify_slice is a constant-time comparison.
    mac(secret, &payload)
        .verify_slice(token.signature())
        .map_err(|_| VerifyError::SignatureInvalid)?;

    if token.claims.is_expired_at(now) {
        return Err(VerifyError::Expired);
    }

    Ok(())
}
