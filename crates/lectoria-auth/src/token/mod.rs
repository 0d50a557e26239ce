//! Compact signed access tokens: claims, wire codec, and verification.

pub mod claims;
pub mod codec;
pub mod verifier;

pub use claims::AccessClaims;
pub use codec::{DecodeError, DecodedToken};
pub use verifier::VerifyError;
