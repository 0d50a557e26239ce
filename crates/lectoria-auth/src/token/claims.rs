//! Access token claims payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lectoria_core::types::IdentityKey;

/// The payload carried by every access token.
///
/// Immutable once minted. Timestamps are epoch seconds; the validity window
/// is `[issued_at, expires_at)` — a token is usable strictly before
/// `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// The signing authority that minted the token.
    pub issuer: String,
    /// The principal's durable identity key, stable across sessions.
    pub subject: IdentityKey,
    /// Issued-at timestamp (seconds since epoch).
    pub issued_at: i64,
    /// Expiration timestamp (seconds since epoch).
    pub expires_at: i64,
}

impl AccessClaims {
    /// Build claims for a token minted at `now` with the given TTL.
    pub fn new(
        issuer: impl Into<String>,
        subject: IdentityKey,
        ttl_seconds: u64,
        now: DateTime<Utc>,
    ) -> Self {
        let issued_at = now.timestamp();
        Self {
            issuer: issuer.into(),
            subject,
            issued_at,
            expires_at: issued_at + ttl_seconds as i64,
        }
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.expires_at, 0).unwrap_or_else(Utc::now)
    }

    /// Whether the token is expired as of `now`.
    ///
    /// Expiry is inclusive: a token checked exactly at `expires_at` is
    /// already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_ttl_arithmetic() {
        let now = Utc::now();
        let claims = AccessClaims::new("localhost", IdentityKey::from_u64(1), 3600, now);
        assert_eq!(claims.expires_at - claims.issued_at, 3600);
    }

    #[test]
    fn test_expiry_is_inclusive() {
        let now = Utc::now();
        let claims = AccessClaims::new("localhost", IdentityKey::from_u64(1), 10, now);
        assert!(!claims.is_expired_at(now));
        assert!(claims.is_expired_at(now + Duration::seconds(10)));
        assert!(claims.is_expired_at(now + Duration::seconds(11)));
    }
}
