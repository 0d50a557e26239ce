//! Role entity model.

use serde::{Deserialize, Serialize};

use lectoria_core::types::RoleId;

use super::permission::Permission;

/// A named, shared bundle of permission flags assigned to users.
///
/// Roles are durable and mutated only through the administrative
/// role-management path; the auth core reads them as immutable values.
/// Permissions are a fixed set of booleans rather than a dynamic map so
/// the authorization engine can match on them exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Durable role identifier.
    pub id: RoleId,
    /// Human-readable role name.
    pub name: String,

    /// May list all registered users.
    #[serde(default)]
    pub list_users: bool,
    /// May manage user accounts.
    #[serde(default)]
    pub manage_users: bool,
    /// May manage roles.
    #[serde(default)]
    pub manage_roles: bool,
    /// May purchase courses.
    #[serde(default = "default_true")]
    pub buy_courses: bool,
    /// May acquire priced courses without payment.
    #[serde(default)]
    pub buy_courses_for_free: bool,
    /// May create courses and lectures.
    #[serde(default)]
    pub create_courses: bool,
    /// May edit existing courses.
    #[serde(default)]
    pub edit_courses: bool,
    /// May create and dispatch bulk mailings.
    #[serde(default)]
    pub manage_mailings: bool,
}

fn default_true() -> bool {
    true
}

impl Role {
    /// The built-in minimal-privilege role assigned when no explicit role
    /// has been granted. Matches the column defaults of the role table:
    /// only `buy_courses` is on.
    pub fn default_role() -> Self {
        Self {
            id: RoleId::from_u64(0),
            name: "user".to_string(),
            list_users: false,
            manage_users: false,
            manage_roles: false,
            buy_courses: true,
            buy_courses_for_free: false,
            create_courses: false,
            edit_courses: false,
            manage_mailings: false,
        }
    }

    /// Whether this role grants the given permission.
    pub fn permits(&self, permission: Permission) -> bool {
        match permission {
            Permission::ListUsers => self.list_users,
            Permission::ManageUsers => self.manage_users,
            Permission::ManageRoles => self.manage_roles,
            Permission::BuyCourses => self.buy_courses,
            Permission::BuyCoursesForFree => self.buy_courses_for_free,
            Permission::CreateCourses => self.create_courses,
            Permission::EditCourses => self.edit_courses,
            Permission::ManageMailings => self.manage_mailings,
        }
    }

    /// The permissions this role grants, in declaration order.
    pub fn granted(&self) -> Vec<Permission> {
        Permission::ALL
            .into_iter()
            .filter(|p| self.permits(*p))
            .collect()
    }
}
