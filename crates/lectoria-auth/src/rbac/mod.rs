//! Role-based authorization checks.

pub mod engine;

pub use engine::{Denial, has_permission, require_permission, require_purchase};
