//! External single-sign-on identity exchange trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::IdentityKey;

/// A verified identity returned by a successful SSO code exchange.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExternalIdentity {
    /// The provider's stable account id for the user.
    pub identity: IdentityKey,
    /// The account email, if the provider shared it.
    pub email: Option<String>,
}

/// Exchanges an external authorization code for a verified identity.
///
/// The provider is a black box: implementations own transport, retries and
/// provider-specific error decoding, and surface failures as
/// `ErrorKind::ExternalService`. This core only consumes the success shape.
#[async_trait]
pub trait IdentityExchange: Send + Sync + 'static {
    /// Exchange an authorization code for the account identity behind it.
    async fn exchange(&self, code: &str) -> AppResult<ExternalIdentity>;
}
