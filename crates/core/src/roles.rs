//! Well-known role name constants.
//!
//! These must match the `chk_users_role` constraint in the schema script.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CUSTOMER: &str = "customer";

/// All assignable roles.
pub const VALID_ROLES: &[&str] = &[ROLE_CUSTOMER, ROLE_ADMIN];

/// Validate that `role` is one of the known role names.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {VALID_ROLES:?}"
        )))
    }
}
