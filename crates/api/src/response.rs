//! Shared response envelope types for API handlers.
//!
//! Single resources and mutations answer with `{ "data": ... }`; list
//! endpoints that the web client pages through answer with
//! `{ "items": [...] }`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: set }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "items": [...] }` envelope used by list endpoints.
#[derive(Debug, Serialize)]
pub struct ItemsResponse<T: Serialize> {
    pub items: Vec<T>,
}
