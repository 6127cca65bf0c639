//! Glaze API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, file
//! store) so integration tests and both binaries can share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod shutdown;
pub mod state;
pub mod storage;
