//! # lectoria-auth
//!
//! The authentication and authorization core of Lectoria: compact signed
//! access tokens (issuance, decoding, verification), resolution of verified
//! tokens into request principals, and role-based permission checks.
//!
//! This crate is intentionally decoupled from HTTP and storage. Transports
//! hand credential values to the [`gateway::AuthGateway`]; the user store is
//! consumed behind the [`store::UserStore`] trait.

pub mod gateway;
pub mod issuance;
pub mod rbac;
pub mod resolver;
pub mod store;
pub mod token;

pub use gateway::{AuthError, AuthGateway, Credential};
pub use issuance::{IssuedSession, SessionIssuer};
pub use rbac::{Denial, has_permission, require_permission, require_purchase};
pub use resolver::{Principal, PrincipalResolver, ResolveError};
pub use store::UserStore;
pub use token::claims::AccessClaims;
pub use token::codec::{DecodeError, DecodedToken};
pub use token::verifier::VerifyError;
