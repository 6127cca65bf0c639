//! Serving and uploading files in the file store.

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::{content_type_for_key, validate_key};

/// Prefix for uploads that do not name their own key.
const UPLOAD_PREFIX: &str = "uploads";

/// Description of a stored upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFileInfo {
    pub key: String,
    /// Public URL for use as an asset value or cover image.
    pub url: String,
    pub size: usize,
    pub content_type: &'static str,
}

/// GET /api/files/{*path}
///
/// Stream a stored file with a content type guessed from its extension.
pub async fn serve(State(state): State<AppState>, Path(path): Path<String>) -> AppResult<Response> {
    let stored = state
        .files
        .open(&path)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("File '{path}' not found")))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for_key(&path))
        .header(header::CONTENT_LENGTH, stored.len.to_string())
        .header(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=86400"),
        )
        .body(Body::from_stream(ReaderStream::new(stored.reader)))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

/// Key for an upload without an explicit `key` field: a fresh id under
/// [`UPLOAD_PREFIX`], keeping a short alphanumeric extension when the
/// original filename has one.
fn generated_key(file_name: Option<&str>) -> String {
    let ext = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    match ext {
        Some(ext) => format!("{UPLOAD_PREFIX}/{}.{ext}", Uuid::new_v4()),
        None => format!("{UPLOAD_PREFIX}/{}", Uuid::new_v4()),
    }
}

/// POST /api/admin/files
///
/// Multipart fields: `file` (required) and `key` (optional target key).
pub async fn upload(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut requested_key: Option<String> = None;
    let mut file: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("key") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                requested_key = Some(text.trim().to_string());
            }
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some((file_name, data.to_vec()));
            }
            _ => {}
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing multipart field 'file'".into()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let key = match requested_key.filter(|k| !k.is_empty()) {
        Some(key) => key,
        None => generated_key(file_name.as_deref()),
    };
    validate_key(&key)?;

    state.files.put(&key, &data).await?;
    tracing::info!(key = %key, bytes = data.len(), admin = %admin.external_id, "File uploaded");

    let info = StoredFileInfo {
        url: format!("/api/files/{key}"),
        size: data.len(),
        content_type: content_type_for_key(&key),
        key,
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data: info })))
}
