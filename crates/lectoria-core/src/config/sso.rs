//! Single-sign-on (SSO) exchange configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external SSO authorization-code exchange.
///
/// The provider itself is a black box to this system; these values only
/// parameterize the outbound exchange call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsoConfig {
    /// Base URL of the SSO provider API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Method name of the OAuth code exchange endpoint.
    #[serde(default = "default_exchange_method")]
    pub oauth_exchange_method: String,
    /// OAuth client id registered with the provider.
    #[serde(default)]
    pub client_id: u64,
    /// OAuth client secret registered with the provider.
    #[serde(default)]
    pub client_secret: String,
    /// Redirect URI used during the authorization flow.
    #[serde(default)]
    pub redirect_uri: String,
}

fn default_api_url() -> String {
    "https://sso.example.com/api".to_string()
}

fn default_exchange_method() -> String {
    "oauth.accessToken".to_string()
}
