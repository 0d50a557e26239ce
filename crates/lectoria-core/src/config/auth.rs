//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token issuance and verification configuration.
///
/// Passed into the auth gateway at construction; nothing in the auth core
/// reads configuration from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
    /// Issuer name embedded in every minted token.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Access token TTL in seconds.
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl_seconds: u64,
}

fn default_secret_key() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_issuer() -> String {
    "localhost".to_string()
}

fn default_access_token_ttl() -> u64 {
    // 90 days.
    7_776_000
}
