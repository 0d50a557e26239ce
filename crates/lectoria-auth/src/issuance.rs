//! Session issuance from the external SSO exchange.
//!
//! The provider verifies the user and hands back a stable identity; this
//! module turns that into a user record (created on first sight) and a
//! freshly minted access token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use lectoria_core::result::AppResult;
use lectoria_core::traits::IdentityExchange;
use lectoria_core::types::IdentityKey;

use crate::gateway::AuthGateway;
use crate::store::UserStore;

/// Result of a successful SSO login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedSession {
    /// The minted access token.
    pub token: String,
    /// The identity the token was minted for.
    pub subject: IdentityKey,
    /// Token expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Exchanges SSO authorization codes for Lectoria sessions.
#[derive(Clone)]
pub struct SessionIssuer {
    /// The black-box identity provider exchange.
    exchange: Arc<dyn IdentityExchange>,
    /// The durable user store.
    store: Arc<dyn UserStore>,
    /// Token minting.
    gateway: Arc<AuthGateway>,
}

impl SessionIssuer {
    /// Creates an issuer over the given collaborators.
    pub fn new(
        exchange: Arc<dyn IdentityExchange>,
        store: Arc<dyn UserStore>,
        gateway: Arc<AuthGateway>,
    ) -> Self {
        Self {
            exchange,
            store,
            gateway,
        }
    }

    /// Complete an SSO login: exchange the code, get-or-create the user
    /// record, and mint an access token.
    ///
    /// The record must exist before the token does — that ordering is what
    /// makes a later missing record an integrity failure rather than a race.
    pub async fn login(&self, code: &str, now: DateTime<Utc>) -> AppResult<IssuedSession> {
        let identity = self.exchange.exchange(code).await?;

        let user = match self
            .store
            .get_by_external_identity(identity.identity)
            .await?
        {
            Some(user) => user,
            None => {
                let user = self.store.create(identity.identity, identity.email).await?;
                info!(user_id = %user.id, "registered user from sso identity");
                user
            }
        };

        let (token, expires_at) = self.gateway.issue_token(user.identity_key, now);
        info!(subject = %user.identity_key, %expires_at, "issued access token");

        Ok(IssuedSession {
            token,
            subject: user.identity_key,
            expires_at,
        })
    }
}
