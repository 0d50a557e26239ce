//! Resolution of verified token subjects into request principals.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use lectoria_core::error::AppError;
use lectoria_core::types::{IdentityKey, UserId};
use lectoria_entity::role::Role;

use crate::store::UserStore;

/// The authenticated identity attached to one request.
///
/// Constructed per-request, never persisted, and discarded when the request
/// ends. Carries the user's role as read at lookup time.
#[derive(Debug, Clone)]
pub struct Principal {
    /// The durable identity key from the token subject.
    pub identity_key: IdentityKey,
    /// The backing record in the user store.
    pub user_id: UserId,
    /// The user's current role.
    pub role: Role,
}

/// Why a verified subject could not be resolved.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The subject of a *verified* token has no backing user record.
    ///
    /// Tokens are minted only after the record is created and users are
    /// never deleted, so this is a broken system invariant, not a normal
    /// not-found. Callers must surface it as a generic invalid token.
    #[error("authentication integrity check failed for subject {0}")]
    IntegrityFailure(IdentityKey),
    /// The user store itself failed.
    #[error("user store lookup failed")]
    Store(#[source] AppError),
}

/// Maps verified token subjects to stored user records.
#[derive(Clone)]
pub struct PrincipalResolver {
    /// The durable user store.
    store: Arc<dyn UserStore>,
}

impl PrincipalResolver {
    /// Creates a resolver over the given store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Look up the record behind a verified subject and attach its role.
    ///
    /// A missing record is logged as an integrity event before being
    /// returned; silent continuation must never occur.
    pub async fn resolve(&self, subject: IdentityKey) -> Result<Principal, ResolveError> {
        let user = self
            .store
            .get_by_identity_key(subject)
            .await
            .map_err(ResolveError::Store)?;

        let Some(user) = user else {
            warn!(
                subject = %subject,
                "authentication integrity check failure: verified token subject has no user record"
            );
            return Err(ResolveError::IntegrityFailure(subject));
        };

        Ok(Principal {
            identity_key: user.identity_key,
            user_id: user.id,
            role: user.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use lectoria_entity::user::User;

    use crate::store::MemoryUserStore;

    use super::*;

    #[tokio::test]
    async fn test_resolves_known_subject() {
        let store = MemoryUserStore::new();
        let key = IdentityKey::from_u64(11);
        store.insert(User::register(key, None, Utc::now())).await;

        let resolver = PrincipalResolver::new(Arc::new(store));
        let principal = resolver.resolve(key).await.expect("should resolve");
        assert_eq!(principal.identity_key, key);
        assert_eq!(principal.user_id, key.into());
    }

    #[tokio::test]
    async fn test_unknown_subject_is_integrity_failure() {
        let resolver = PrincipalResolver::new(Arc::new(MemoryUserStore::new()));
        let err = resolver
            .resolve(IdentityKey::from_u64(404))
            .await
            .expect_err("must fail");
        assert!(matches!(err, ResolveError::IntegrityFailure(key) if key.as_u64() == 404));
    }

    #[tokio::test]
    async fn test_role_is_read_at_lookup_time() {
        let store = MemoryUserStore::new();
        let key = IdentityKey::from_u64(12);
        store.insert(User::register(key, None, Utc::now())).await;

        let mut elevated = lectoria_entity::role::Role::default_role();
        elevated.manage_roles = true;
        store.set_role(key, elevated).await;

        let resolver = PrincipalResolver::new(Arc::new(store));
        let principal = resolver.resolve(key).await.expect("should resolve");
        assert!(principal.role.manage_roles);
    }
}
