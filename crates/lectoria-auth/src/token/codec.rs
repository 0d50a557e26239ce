//! Access token wire codec.
//!
//! The wire format is compatibility-bearing: changing any part of it
//! invalidates every previously issued token.
//!
//! A token is three base64url segments (no padding) joined by `.`:
//!
//! ```text
//! base64url(issuer) . base64url("{subject}:{issued_at}:{expires_at}") . base64url(signature)
//! ```
//!
//! The signature is HMAC-SHA256 over the first two segments joined by `.`
//! (the canonical payload), keyed with the issuer's secret. Encoding is
//! deterministic: the same claims and key always produce the same string.
//!
//! Decoding is purely syntactic. It never touches the secret key and never
//! checks the signature; that is [`verifier`](super::verifier)'s job, which
//! keeps the verifier reusable against payloads arriving via any transport.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use lectoria_core::types::IdentityKey;

use super::claims::AccessClaims;

/// Separator between token segments.
const SEGMENT_SEPARATOR: char = '.';

/// Number of segments in a well-formed token.
const SEGMENT_COUNT: usize = 3;

pub(super) type HmacSha256 = Hmac<Sha256>;

/// A token that failed syntactic decoding.
///
/// Deliberately carries no detail about which part was malformed, so that
/// responses built from it cannot be used as a parsing oracle.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("malformed token")]
pub struct DecodeError;

/// A syntactically valid token whose signature has **not** been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    /// The decoded payload fields.
    pub claims: AccessClaims,
    /// The raw signature bytes from the third segment.
    pub(crate) signature: Vec<u8>,
}

impl DecodedToken {
    /// The signature bytes carried by the token (untrusted until verified).
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }
}

/// The canonical, order-stable payload representation used as signature
/// input, identical at encode and verify time.
pub(super) fn canonical_payload(claims: &AccessClaims) -> String {
    let issuer = URL_SAFE_NO_PAD.encode(claims.issuer.as_bytes());
    let body = URL_SAFE_NO_PAD.encode(format!(
        "{}:{}:{}",
        claims.subject, claims.issued_at, claims.expires_at
    ));
    format!("{issuer}{SEGMENT_SEPARATOR}{body}")
}

/// Build the keyed digest over `payload`.
pub(super) fn mac(secret: &str, payload: &str) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(payload.as_bytes());
    mac
}

/// Encode claims into the transport-safe token string.
pub fn encode(claims: &AccessClaims, secret: &str) -> String {
    let payload = canonical_payload(claims);
    let signature = mac(secret, &payload).finalize().into_bytes();
    let signature = URL_SAFE_NO_PAD.encode(signature);
    format!("{payload}{SEGMENT_SEPARATOR}{signature}")
}

/// Decode a token string into its payload fields and signature bytes.
///
/// Rejects anything that is not exactly three parseable segments. Does not
/// verify the signature.
pub fn decode(token: &str) -> Result<DecodedToken, DecodeError> {
    let segments: Vec<&str> = token.split(SEGMENT_SEPARATOR).collect();
    if segments.len() != SEGMENT_COUNT {
        return Err(DecodeError);
    }

    let issuer = URL_SAFE_NO_PAD.decode(segments[0]).map_err(|_| DecodeError)?;
    let issuer = String::from_utf8(issuer).map_err(|_| DecodeError)?;

    let body = URL_SAFE_NO_PAD.decode(segments[1]).map_err(|_| DecodeError)?;
    let body = String::from_utf8(body).map_err(|_| DecodeError)?;
    let mut fields = body.split(':');
    let subject = fields.next().ok_or(DecodeError)?;
    let issued_at = fields.next().ok_or(DecodeError)?;
    let expires_at = fields.next().ok_or(DecodeError)?;
    if fields.next().is_some() {
        return Err(DecodeError);
    }

    let subject: IdentityKey = subject.parse().map_err(|_| DecodeError)?;
    let issued_at: i64 = issued_at.parse().map_err(|_| DecodeError)?;
    let expires_at: i64 = expires_at.parse().map_err(|_| DecodeError)?;

    let signature = URL_SAFE_NO_PAD.decode(segments[2]).map_err(|_| DecodeError)?;

    Ok(DecodedToken {
        claims: AccessClaims {
            issuer,
            subject,
            issued_at,
            expires_at,
        },
        signature,
    })
}
