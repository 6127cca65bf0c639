use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use glaze_core::error::CoreError;
use glaze_core::thumbnail::ThumbnailError;
use serde_json::json;

use crate::storage::StorageError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `glaze_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Thumbnail generation failed.
    #[error(transparent)]
    Thumbnail(#[from] ThumbnailError),

    /// The file store rejected a key or failed on I/O.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A resource addressed by something other than a database id is missing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::from(errors))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Thumbnail errors ---
            AppError::Thumbnail(err) => match err {
                ThumbnailError::Decode(_) => {
                    (StatusCode::BAD_REQUEST, "DECODE_ERROR", err.to_string())
                }
                ThumbnailError::InvalidOptions(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
                }
                ThumbnailError::TooLarge(_) => (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "PAYLOAD_TOO_LARGE",
                    err.to_string(),
                ),
                ThumbnailError::Encode(msg) => {
                    tracing::error!(error = %msg, "Thumbnail encoding failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "ENCODE_ERROR",
                        "Thumbnail encoding failed".to_string(),
                    )
                }
            },

            // --- File store errors ---
            AppError::Storage(err) => match err {
                StorageError::InvalidKey(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_FILE_KEY", err.to_string())
                }
                StorageError::Io(e) => {
                    tracing::error!(error = %e, "File store I/O error");
                    internal()
                }
            },

            // --- HTTP-specific errors ---
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on `uq_*` constraints map to 409.
/// - Foreign-key and CHECK violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some("23505") if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                Some("23503") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Referenced record does not exist ({constraint})"),
                    );
                }
                Some("23514") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Value violates check constraint: {constraint}"),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn status_and_code(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json["code"].as_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn decode_failure_is_client_error() {
        let (status, code) =
            status_and_code(ThumbnailError::Decode("bad magic".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "DECODE_ERROR");
    }

    #[tokio::test]
    async fn encode_failure_is_server_error() {
        let (status, code) = status_and_code(ThumbnailError::Encode("empty".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "ENCODE_ERROR");
    }

    #[tokio::test]
    async fn core_errors_map_to_statuses() {
        let cases = [
            (
                AppError::Core(CoreError::NotFound { entity: "OverlaySet", id: 9 }),
                StatusCode::NOT_FOUND,
            ),
            (AppError::Core(CoreError::Conflict("x".into())), StatusCode::CONFLICT),
            (AppError::Core(CoreError::Forbidden("x".into())), StatusCode::FORBIDDEN),
            (AppError::Core(CoreError::Unauthorized("x".into())), StatusCode::UNAUTHORIZED),
            (AppError::Storage(StorageError::InvalidKey("..".into())), StatusCode::BAD_REQUEST),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn internal_details_are_not_leaked() {
        let response = AppError::InternalError("secret path /srv/x".into()).into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!text.contains("/srv/x"));
    }
}
