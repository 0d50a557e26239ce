//! Role domain entities.

pub mod model;
pub mod permission;

pub use model::Role;
pub use permission::Permission;
