//! Thumbnail preview for a freshly picked photo.

use axum::body::Body;
use axum::extract::{Multipart, Query};
use axum::http::{header, StatusCode};
use axum::response::Response;
use glaze_core::thumbnail::{generate_thumbnail, Thumbnail, ThumbnailOptions};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Optional overrides of the default bounds and quality.
#[derive(Debug, Deserialize)]
pub struct ThumbnailParams {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub quality: Option<f32>,
}

pub const WIDTH_HEADER: &str = "x-thumbnail-width";
pub const HEIGHT_HEADER: &str = "x-thumbnail-height";

/// POST /api/thumbnails?max_width=&max_height=&quality=
///
/// Multipart field `file` carries the source image. Responds with the JPEG
/// bytes and the output dimensions in `X-Thumbnail-Width` /
/// `X-Thumbnail-Height`.
pub async fn create(
    Query(params): Query<ThumbnailParams>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let options = ThumbnailOptions::with_overrides(params.max_width, params.max_height, params.quality);
    options.validate()?;

    let mut source = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            source = Some(data);
            break;
        }
    }
    let source =
        source.ok_or_else(|| AppError::BadRequest("Missing multipart field 'file'".into()))?;

    // Decode and resize are CPU-bound.
    let thumbnail: Thumbnail =
        tokio::task::spawn_blocking(move || generate_thumbnail(&source, &options))
            .await
            .map_err(|e| AppError::InternalError(format!("Thumbnail task failed: {e}")))??;

    tracing::debug!(
        width = thumbnail.width,
        height = thumbnail.height,
        bytes = thumbnail.blob.len(),
        "Thumbnail generated"
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, thumbnail.blob.content_type.as_str())
        .header(header::CONTENT_LENGTH, thumbnail.blob.len().to_string())
        .header(WIDTH_HEADER, thumbnail.width.to_string())
        .header(HEIGHT_HEADER, thumbnail.height.to_string())
        .body(Body::from(thumbnail.blob.data))
        .map_err(|e| AppError::InternalError(e.to_string()))
}
