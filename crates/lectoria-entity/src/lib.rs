//! # lectoria-entity
//!
//! Domain entity models for Lectoria. Every struct in this crate represents
//! a durable record or a domain value object. All entities derive `Debug`,
//! `Clone`, `Serialize`, and `Deserialize`.

pub mod role;
pub mod user;
