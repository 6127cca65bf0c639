//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller identified by a Bearer token.
//! - [`auth::OptionalAuth`] -- the caller when a valid token is present.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`rbac::RequireAuth`] -- requires any authenticated caller.

pub mod auth;
pub mod rbac;
