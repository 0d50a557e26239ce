//! Collaborator traits.

pub mod identity;

pub use identity::{ExternalIdentity, IdentityExchange};
