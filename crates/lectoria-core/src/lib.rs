//! # lectoria-core
//!
//! Core crate for the Lectoria course platform. Contains collaborator
//! traits, configuration schemas, typed identifiers, the public API error
//! code vocabulary, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Lectoria crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
