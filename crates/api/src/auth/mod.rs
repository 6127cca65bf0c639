//! Authentication primitives.
//!
//! Sessions are issued by the external identity provider; this crate only
//! verifies them. See [`jwt`].

pub mod jwt;
