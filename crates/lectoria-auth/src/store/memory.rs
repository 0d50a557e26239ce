//! In-memory user store for tests and single-node embedding.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use lectoria_core::error::AppError;
use lectoria_core::result::AppResult;
use lectoria_core::types::IdentityKey;
use lectoria_entity::role::Role;
use lectoria_entity::user::User;

use super::UserStore;

/// In-memory [`UserStore`] using a Tokio mutex for thread safety.
///
/// Suitable for tests and single-node deployments only.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    /// Records keyed by identity key.
    users: Arc<Mutex<HashMap<IdentityKey, User>>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) a record directly, bypassing `create`.
    pub async fn insert(&self, user: User) {
        self.users.lock().await.insert(user.identity_key, user);
    }

    /// Removes a record; returns whether one existed.
    pub async fn remove(&self, key: IdentityKey) -> bool {
        self.users.lock().await.remove(&key).is_some()
    }

    /// Replaces the role of an existing record; returns whether it existed.
    pub async fn set_role(&self, key: IdentityKey, role: Role) -> bool {
        match self.users.lock().await.get_mut(&key) {
            Some(user) => {
                user.role = role;
                user.updated_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_by_identity_key(&self, key: IdentityKey) -> AppResult<Option<User>> {
        Ok(self.users.lock().await.get(&key).cloned())
    }

    async fn get_by_external_identity(&self, identity: IdentityKey) -> AppResult<Option<User>> {
        self.get_by_identity_key(identity).await
    }

    async fn create(&self, identity: IdentityKey, email: Option<String>) -> AppResult<User> {
        let mut users = self.users.lock().await;
        if users.contains_key(&identity) {
            return Err(AppError::conflict(format!(
                "user record for identity {identity} already exists"
            )));
        }
        let user = User::register(identity, email, Utc::now());
        users.insert(identity, user.clone());
        Ok(user)
    }
}
