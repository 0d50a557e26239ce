//! Named permissions checked by the authorization engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named permission that may be granted to a role.
///
/// The set is closed so that every role can be checked against every
/// permission exhaustively at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// List all registered users.
    ListUsers,
    /// Manage user accounts.
    ManageUsers,
    /// Create, edit, and delete roles.
    ManageRoles,
    /// Purchase courses.
    BuyCourses,
    /// Acquire priced courses without payment.
    BuyCoursesForFree,
    /// Create new courses (including lectures).
    CreateCourses,
    /// Edit existing courses.
    EditCourses,
    /// Create and dispatch bulk mailings.
    ManageMailings,
}

impl Permission {
    /// All permissions, in declaration order.
    pub const ALL: [Permission; 8] = [
        Permission::ListUsers,
        Permission::ManageUsers,
        Permission::ManageRoles,
        Permission::BuyCourses,
        Permission::BuyCoursesForFree,
        Permission::CreateCourses,
        Permission::EditCourses,
        Permission::ManageMailings,
    ];

    /// Stable snake_case name, as used in role records and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListUsers => "list_users",
            Self::ManageUsers => "manage_users",
            Self::ManageRoles => "manage_roles",
            Self::BuyCourses => "buy_courses",
            Self::BuyCoursesForFree => "buy_courses_for_free",
            Self::CreateCourses => "create_courses",
            Self::EditCourses => "edit_courses",
            Self::ManageMailings => "manage_mailings",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_every_variant() {
        // A duplicate in ALL would shrink the deduplicated set.
        let unique: std::collections::HashSet<_> = Permission::ALL.iter().collect();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Permission::BuyCoursesForFree).expect("serialize");
        assert_eq!(json, "\"buy_courses_for_free\"");
    }
}
