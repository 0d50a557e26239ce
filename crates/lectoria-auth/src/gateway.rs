//! Auth gateway: the single entry point every protected operation uses.
//!
//! Pipeline: decode → verify → resolve → (optional) authorize. Each stage's
//! failure short-circuits into one [`AuthError`] kind. The gateway owns the
//! signing configuration; there is no ambient settings state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use lectoria_core::config::auth::AuthConfig;
use lectoria_core::error::{ApiErrorCode, AppError};
use lectoria_core::types::IdentityKey;
use lectoria_entity::role::Permission;

use crate::rbac::{Denial, require_permission};
use crate::resolver::{Principal, PrincipalResolver, ResolveError};
use crate::store::UserStore;
use crate::token::claims::AccessClaims;
use crate::token::codec;
use crate::token::verifier::{self, VerifyError};

/// A bearer credential extracted from an inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Extract a credential from the two supported channels.
    ///
    /// A non-empty authorization header is authoritative; the query
    /// parameter is consulted only when the header is absent or empty and
    /// is silently ignored otherwise — the two are never merged or
    /// compared. An optional `Bearer ` prefix is stripped from the header
    /// value.
    pub fn from_parts(header: Option<&str>, query_param: Option<&str>) -> Option<Self> {
        let from_header = header
            .map(|h| h.strip_prefix("Bearer ").unwrap_or(h).trim())
            .filter(|h| !h.is_empty());
        let from_query = query_param.map(str::trim).filter(|q| !q.is_empty());

        from_header
            .or(from_query)
            .map(|token| Self(token.to_string()))
    }

    /// Wrap an already-extracted raw token value.
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Everything that can go wrong between an inbound credential and an
/// authorized principal.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential was supplied on either channel.
    #[error("no credential supplied")]
    MissingCredential,
    /// The token string failed syntactic decoding.
    #[error("malformed token")]
    MalformedToken,
    /// The token carries a signature our key did not produce.
    #[error("token signature is invalid")]
    SignatureInvalid,
    /// The token's validity window has closed.
    #[error("token has expired")]
    Expired,
    /// A verified subject has no backing user record (broken invariant).
    #[error("authentication integrity check failed")]
    IntegrityFailure,
    /// The resolved principal's role does not grant the permission.
    #[error("permission '{0}' denied")]
    PermissionDenied(Permission),
    /// The user store failed; not an auth verdict at all.
    #[error("user store failure during authentication")]
    Store(#[source] AppError),
}

impl AuthError {
    /// The client-facing error code for this failure.
    ///
    /// Intentionally collapses `MalformedToken`, `SignatureInvalid`, and
    /// `IntegrityFailure` into one invalid-token code so responses do not
    /// explain why a token was rejected.
    pub fn client_code(&self) -> ApiErrorCode {
        match self {
            Self::MissingCredential => ApiErrorCode::AuthRequired,
            Self::MalformedToken | Self::SignatureInvalid | Self::IntegrityFailure => {
                ApiErrorCode::AuthInvalidToken
            }
            Self::Expired => ApiErrorCode::AuthExpiredToken,
            Self::PermissionDenied(_) => ApiErrorCode::Forbidden,
            Self::Store(_) => ApiErrorCode::InternalServerError,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::PermissionDenied(permission) => {
                AppError::authorization(format!("permission '{permission}' denied"))
            }
            AuthError::IntegrityFailure => {
                AppError::integrity("verified token subject has no user record")
            }
            AuthError::Store(inner) => inner,
            other => AppError::authentication(other.to_string()),
        }
    }
}

/// Issues and authenticates access tokens against one user store.
#[derive(Clone)]
pub struct AuthGateway {
    /// Signing configuration (secret key, issuer, TTL).
    config: AuthConfig,
    /// Resolver over the durable user store.
    resolver: PrincipalResolver,
}

impl AuthGateway {
    /// Creates a gateway from explicit configuration and a user store.
    pub fn new(config: AuthConfig, store: Arc<dyn UserStore>) -> Self {
        Self {
            config,
            resolver: PrincipalResolver::new(store),
        }
    }

    /// The issuer name minted into tokens.
    pub fn issuer(&self) -> &str {
        &self.config.issuer
    }

    /// Mint a token for `subject` at `now` with the configured TTL.
    ///
    /// Returns the transport-safe token string and its expiry.
    pub fn issue_token(&self, subject: IdentityKey, now: DateTime<Utc>) -> (String, DateTime<Utc>) {
        let claims = AccessClaims::new(
            self.config.issuer.clone(),
            subject,
            self.config.access_token_ttl_seconds,
            now,
        );
        let token = codec::encode(&claims, &self.config.secret_key);
        (token, claims.expires_at())
    }

    /// Strict-mode authentication: decode, verify, and resolve.
    ///
    /// Every failure is reported precisely; protected operations map the
    /// result through [`AuthError::client_code`].
    pub async fn authenticate(
        &self,
        credential: Option<Credential>,
        now: DateTime<Utc>,
    ) -> Result<Principal, AuthError> {
        let credential = credential.ok_or(AuthError::MissingCredential)?;

        let decoded = codec::decode(credential.as_str()).map_err(|_| AuthError::MalformedToken)?;

        verifier::verify(&decoded, &self.config.secret_key, now).map_err(|err| match err {
            VerifyError::SignatureInvalid => {
                // Forged, or signed by a foreign authority.
                warn!(
                    issuer = %decoded.claims.issuer,
                    subject = %decoded.claims.subject,
                    "rejected token with invalid signature"
                );
                AuthError::SignatureInvalid
            }
            VerifyError::Expired => AuthError::Expired,
        })?;

        let principal = self
            .resolver
            .resolve(decoded.claims.subject)
            .await
            .map_err(|err| match err {
                ResolveError::IntegrityFailure(_) => AuthError::IntegrityFailure,
                ResolveError::Store(inner) => AuthError::Store(inner),
            })?;

        Ok(principal)
    }

    /// Strict-mode authentication plus a required permission.
    pub async fn authenticate_with_permission(
        &self,
        credential: Option<Credential>,
        permission: Permission,
        now: DateTime<Utc>,
    ) -> Result<Principal, AuthError> {
        let principal = self.authenticate(credential, now).await?;

        require_permission(&principal, permission).map_err(|Denial::MissingPermission(p)| {
            debug!(
                subject = %principal.identity_key,
                permission = %p,
                "permission denied"
            );
            AuthError::PermissionDenied(p)
        })?;

        Ok(principal)
    }

    /// Best-effort authentication for endpoints that merely behave
    /// differently for anonymous callers.
    ///
    /// Collapses every failure into `None` without distinguishing cause, so
    /// nothing about why authentication failed can leak.
    pub async fn try_authenticate(
        &self,
        credential: Option<Credential>,
        now: DateTime<Utc>,
    ) -> Option<Principal> {
        self.authenticate(credential, now).await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_wins_over_query() {
        let credential = Credential::from_parts(Some("header-token"), Some("query-token"));
        assert_eq!(credential.expect("present").as_str(), "header-token");
    }

    #[test]
    fn test_bearer_prefix_is_stripped() {
        let credential = Credential::from_parts(Some("Bearer abc.def.ghi"), None);
        assert_eq!(credential.expect("present").as_str(), "abc.def.ghi");
    }

    #[test]
    fn test_empty_header_falls_back_to_query() {
        let credential = Credential::from_parts(Some(""), Some("query-token"));
        assert_eq!(credential.expect("present").as_str(), "query-token");
    }

    #[test]
    fn test_no_channels_is_none() {
        assert_eq!(Credential::from_parts(None, None), None);
        assert_eq!(Credential::from_parts(Some(""), Some("")), None);
    }

    #[test]
    fn test_client_code_collapses_invalid_token_kinds() {
        assert_eq!(
            AuthError::MalformedToken.client_code(),
            ApiErrorCode::AuthInvalidToken
        );
        assert_eq!(
            AuthError::SignatureInvalid.client_code(),
            ApiErrorCode::AuthInvalidToken
        );
        assert_eq!(
            AuthError::IntegrityFailure.client_code(),
            ApiErrorCode::AuthInvalidToken
        );
        assert_eq!(AuthError::Expired.client_code(), ApiErrorCode::AuthExpiredToken);
        assert_eq!(
            AuthError::MissingCredential.client_code(),
            ApiErrorCode::AuthRequired
        );
        assert_eq!(
            AuthError::PermissionDenied(Permission::ListUsers).client_code(),
            ApiErrorCode::Forbidden
        );
    }
}
