//! User store collaborator.
//!
//! The auth core performs exactly one durable read per request (the
//! principal lookup) and, during SSO issuance, a get-or-create. Everything
//! else about persistence is someone else's problem, hidden behind
//! [`UserStore`].

pub mod memory;

use async_trait::async_trait;

use lectoria_core::result::AppResult;
use lectoria_core::types::IdentityKey;
use lectoria_entity::user::User;

pub use memory::MemoryUserStore;

/// Point lookups and creation over durable user records.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Point lookup by the identity key a token subject refers to.
    async fn get_by_identity_key(&self, key: IdentityKey) -> AppResult<Option<User>>;

    /// Lookup by the external (SSO) account identity.
    ///
    /// Identity keys and external identities coincide today; the methods
    /// stay separate so the store can split them without touching callers.
    async fn get_by_external_identity(&self, identity: IdentityKey) -> AppResult<Option<User>>;

    /// Create a record for a newly seen external identity.
    async fn create(&self, identity: IdentityKey, email: Option<String>) -> AppResult<User>;
}
