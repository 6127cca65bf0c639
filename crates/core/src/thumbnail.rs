//! Thumbnail generation for uploaded photos.
//!
//! Decodes an uploaded image, scales it down to fit inside a bounding box
//! (aspect ratio preserved, never upscaled), and re-encodes it as JPEG.
//!
//! This function is CPU-bound and should be called inside `spawn_blocking`.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::error::ImageError;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader, Limits};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default bounding-box width in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 300;

/// Default bounding-box height in pixels.
pub const DEFAULT_MAX_HEIGHT: u32 = 200;

/// Default JPEG quality on the `(0, 1]` scale.
pub const DEFAULT_QUALITY: f32 = 0.75;

/// MIME type of every generated thumbnail.
pub const THUMBNAIL_CONTENT_TYPE: &str = "image/jpeg";

/// Maximum input size we'll attempt to decode (20 MiB).
pub const MAX_INPUT_BYTES: usize = 20 * 1024 * 1024;

/// Maximum decoded dimension on either side. Guards against decompression
/// bombs where a small file expands into an enormous pixel buffer.
const MAX_IMAGE_DIMENSION: u32 = 16384;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("Input too large for processing: {0}")]
    TooLarge(String),

    #[error("Invalid thumbnail options: {0}")]
    InvalidOptions(String),
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Bounds and quality for a single thumbnail call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbnailOptions {
    pub max_width: u32,
    pub max_height: u32,
    /// JPEG quality in `(0, 1]`.
    pub quality: f32,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl ThumbnailOptions {
    /// Build options from optional overrides, falling back to the defaults.
    pub fn with_overrides(
        max_width: Option<u32>,
        max_height: Option<u32>,
        quality: Option<f32>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            max_width: max_width.unwrap_or(defaults.max_width),
            max_height: max_height.unwrap_or(defaults.max_height),
            quality: quality.unwrap_or(defaults.quality),
        }
    }

    pub fn validate(&self) -> Result<(), ThumbnailError> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(ThumbnailError::InvalidOptions(
                "max_width and max_height must be greater than 0".into(),
            ));
        }
        if !(self.quality > 0.0 && self.quality <= 1.0) {
            return Err(ThumbnailError::InvalidOptions(format!(
                "quality must be in (0, 1], got {}",
                self.quality
            )));
        }
        Ok(())
    }

    /// Map the `(0, 1]` quality onto the encoder's `1..=100` scale.
    fn encoder_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

/// Binary payload tagged with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub data: Vec<u8>,
    pub content_type: String,
}

impl Blob {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A blob with a filename attached, ready to be uploaded as a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl NamedFile {
    /// Wrap `blob` under `name`, keeping the blob's MIME type.
    pub fn new(blob: Blob, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: blob.content_type,
            data: blob.data,
        }
    }
}

/// Result of a successful thumbnail call.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub blob: Blob,
    pub width: u32,
    pub height: u32,
}

// ---------------------------------------------------------------------------
// Sizing
// ---------------------------------------------------------------------------

/// Compute output dimensions for a `width` x `height` image bounded by
/// `max_width` x `max_height`.
///
/// Images already inside the box keep their natural size. Larger images
/// are scaled by `min(max_width / width, max_height / height)` on both
/// axes, rounded to the nearest pixel and never below 1.
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let ratio = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    );

    let scaled = |n: u32| ((f64::from(n) * ratio).round() as u32).max(1);
    (scaled(width), scaled(height))
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate a JPEG thumbnail from raw image bytes.
///
/// Fails with [`ThumbnailError::Decode`] for bytes that are not a supported
/// image and [`ThumbnailError::Encode`] when the encoder produces nothing.
pub fn generate_thumbnail(
    data: &[u8],
    options: &ThumbnailOptions,
) -> Result<Thumbnail, ThumbnailError> {
    options.validate()?;

    if data.len() > MAX_INPUT_BYTES {
        return Err(ThumbnailError::TooLarge(format!("{} bytes", data.len())));
    }

    let img = decode(data)?;
    let (natural_width, natural_height) = img.dimensions();
    let (width, height) =
        fit_dimensions(natural_width, natural_height, options.max_width, options.max_height);

    let surface = if (width, height) == (natural_width, natural_height) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Lanczos3)
    };

    let data = encode_jpeg(&surface, options.encoder_quality())?;

    Ok(Thumbnail {
        blob: Blob {
            data,
            content_type: THUMBNAIL_CONTENT_TYPE.to_string(),
        },
        width,
        height,
    })
}

/// Decode `data` into a bitmap.
///
/// The reader over the input is owned by this function and released when it
/// returns, whichever path it returns on.
fn decode(data: &[u8]) -> Result<DynamicImage, ThumbnailError> {
    let mut reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ThumbnailError::Decode(e.to_string()))?;

    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_IMAGE_DIMENSION);
    limits.max_image_height = Some(MAX_IMAGE_DIMENSION);
    reader.limits(limits);

    reader.decode().map_err(|e| match e {
        ImageError::Limits(limit) => ThumbnailError::TooLarge(limit.to_string()),
        other => ThumbnailError::Decode(other.to_string()),
    })
}

/// Flatten to RGB (JPEG carries no alpha) and encode.
fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, ThumbnailError> {
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();

    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(&rgb)
        .map_err(|e| ThumbnailError::Encode(e.to_string()))?;

    if buf.is_empty() {
        return Err(ThumbnailError::Encode("encoder produced no data".into()));
    }
    Ok(buf)
}
