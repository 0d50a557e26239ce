//! Authorization engine: evaluates a principal's role against a permission.
//!
//! Pure policy checks; no I/O, no side effects. Default-deny: anything the
//! role does not explicitly grant is refused.

use thiserror::Error;

use lectoria_entity::role::Permission;

use crate::resolver::Principal;

/// Why an authorization check refused the operation.
///
/// Names the failed permission for diagnostics; client-visible responses
/// collapse this into a plain forbidden message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// The principal's role does not grant the required permission.
    #[error("role does not grant permission '{0}'")]
    MissingPermission(Permission),
}

/// Whether the principal's role grants the permission.
pub fn has_permission(principal: &Principal, permission: Permission) -> bool {
    principal.role.permits(permission)
}

/// Require a single permission, default-deny.
pub fn require_permission(principal: &Principal, permission: Permission) -> Result<(), Denial> {
    if principal.role.permits(permission) {
        Ok(())
    } else {
        Err(Denial::MissingPermission(permission))
    }
}

/// Require the composite purchase rule.
///
/// Buying always needs [`Permission::BuyCourses`]. A priced course
/// (`price > 0`) additionally needs [`Permission::BuyCoursesForFree`],
/// since there is no payment path: priced purchases exist only as granted
/// overrides. The two checks run in sequence so the denial names whichever
/// flag was missing.
pub fn require_purchase(principal: &Principal, price: u64) -> Result<(), Denial> {
    require_permission(principal, Permission::BuyCourses)?;
    if price > 0 {
        require_permission(principal, Permission::BuyCoursesForFree)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use lectoria_core::types::{IdentityKey, UserId};
    use lectoria_entity::role::Role;

    use super::*;

    fn principal_with(role: Role) -> Principal {
        Principal {
            identity_key: IdentityKey::from_u64(1),
            user_id: UserId::from_u64(1),
            role,
        }
    }

    #[test]
    fn test_default_deny_for_ungranted_permissions() {
        let principal = principal_with(Role::default_role());
        for permission in Permission::ALL {
            let expected = permission == Permission::BuyCourses;
            assert_eq!(
                has_permission(&principal, permission),
                expected,
                "unexpected verdict for {permission}"
            );
        }
    }

    #[test]
    fn test_denial_names_failed_permission() {
        let principal = principal_with(Role::default_role());
        assert_eq!(
            require_permission(&principal, Permission::ManageMailings),
            Err(Denial::MissingPermission(Permission::ManageMailings))
        );
    }

    #[test]
    fn test_purchase_of_free_course_needs_only_base_flag() {
        let principal = principal_with(Role::default_role());
        assert_eq!(require_purchase(&principal, 0), Ok(()));
    }

    #[test]
    fn test_purchase_of_priced_course_needs_override() {
        let principal = principal_with(Role::default_role());
        assert_eq!(
            require_purchase(&principal, 4900),
            Err(Denial::MissingPermission(Permission::BuyCoursesForFree))
        );

        let mut role = Role::default_role();
        role.buy_courses_for_free = true;
        let principal = principal_with(role);
        assert_eq!(require_purchase(&principal, 4900), Ok(()));
    }

    #[test]
    fn test_purchase_without_base_flag_names_base_flag() {
        let mut role = Role::default_role();
        role.buy_courses = false;
        role.buy_courses_for_free = true;
        let principal = principal_with(role);
        assert_eq!(
            require_purchase(&principal, 4900),
            Err(Denial::MissingPermission(Permission::BuyCourses))
        );
        assert_eq!(
            require_purchase(&principal, 0),
            Err(Denial::MissingPermission(Permission::BuyCourses))
        );
    }
}
