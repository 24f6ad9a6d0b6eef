//! Well-known role name constants.
//!
//! These must match the CHECK constraint in the `users` migration. The role
//! set is closed; any value outside it must be treated as non-privileged.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PREMIUM: &str = "premium";
pub const ROLE_FREEMIUM: &str = "freemium";

/// Every assignable role, in privilege order.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_PREMIUM, ROLE_FREEMIUM];

/// Returns `true` if `role` is one of the assignable role names.
pub fn is_valid_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}
