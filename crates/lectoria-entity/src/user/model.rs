//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lectoria_core::types::{IdentityKey, UserId};

use crate::role::Role;

/// A registered user in the Lectoria system.
///
/// Users are created the first time an SSO identity is seen and are never
/// deleted: once a token has been minted for an identity key, the backing
/// record must exist for the lifetime of that token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Durable record identifier.
    pub id: UserId,
    /// SSO identity key; equal to `id` by construction.
    pub identity_key: IdentityKey,
    /// Email address (optional, provider-supplied).
    pub email: Option<String>,
    /// The user's single assigned role.
    pub role: Role,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a fresh record for a newly seen SSO identity.
    ///
    /// The new user gets the built-in minimal-privilege role until an
    /// administrator assigns something else.
    pub fn register(identity: IdentityKey, email: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: identity.into(),
            identity_key: identity,
            email,
            role: Role::default_role(),
            created_at: now,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Permission;

    #[test]
    fn test_register_uses_default_role() {
        let user = User::register(IdentityKey::from_u64(9), None, Utc::now());
        assert_eq!(user.id.as_u64(), 9);
        assert!(user.role.permits(Permission::BuyCourses));
        assert!(!user.role.permits(Permission::ManageRoles));
    }
}
