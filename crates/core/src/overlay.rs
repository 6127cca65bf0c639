//! Overlay model for the photo editor.
//!
//! An [`Overlay`] is one positioned, styled layer (a CSS gradient or an image
//! texture) composited over the base photo. Overlays live only inside the
//! editor session that created them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What an overlay's `value` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum OverlayKind {
    /// A CSS background expression, e.g. `linear-gradient(...)`.
    Css,
    /// A URL pointing at an image texture.
    Image,
}

impl OverlayKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Image => "image",
        }
    }

    /// Parse from the stored/wire name.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "css" => Ok(Self::Css),
            "image" => Ok(Self::Image),
            other => Err(CoreError::Validation(format!(
                "Unknown overlay kind '{other}'. Must be one of: css, image"
            ))),
        }
    }
}

/// Compositing function applied between an overlay and the layer beneath.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
}

impl BlendMode {
    pub const ALL: [BlendMode; 10] = [
        Self::Normal,
        Self::Multiply,
        Self::Screen,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::HardLight,
        Self::SoftLight,
    ];

    /// The CSS `mix-blend-mode` keyword for this mode.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::HardLight => "hard-light",
            Self::SoftLight => "soft-light",
        }
    }
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

/// One overlay instance inside an editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Overlay {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: OverlayKind,
    pub value: String,
    pub blend_mode: BlendMode,
    /// In `[0, 1]`.
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
    /// Degrees.
    pub rotation: f64,
    pub scale: f64,
    pub flip_h: bool,
    pub flip_v: bool,
}

/// Partial update for an [`Overlay`]. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OverlayPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<BlendMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip_h: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip_v: Option<bool>,
}

impl Overlay {
    /// Create an overlay with a fresh id and neutral placement.
    pub fn new(kind: OverlayKind, value: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            value: value.into(),
            blend_mode: BlendMode::Normal,
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale: 1.0,
            flip_h: false,
            flip_v: false,
        }
    }

    /// Overwrite the fields present in `patch`.
    pub fn apply(&mut self, patch: &OverlayPatch) {
        if let Some(blend_mode) = patch.blend_mode {
            self.blend_mode = blend_mode;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
        if let Some(scale) = patch.scale {
            self.scale = scale;
        }
        if let Some(flip_h) = patch.flip_h {
            self.flip_h = flip_h;
        }
        if let Some(flip_v) = patch.flip_v {
            self.flip_v = flip_v;
        }
    }

    /// CSS `transform` for this overlay's placement. Flips are expressed as
    /// negative scale factors.
    pub fn css_transform(&self) -> String {
        let sx = if self.flip_h { -self.scale } else { self.scale };
        let sy = if self.flip_v { -self.scale } else { self.scale };
        format!(
            "translate({}px, {}px) rotate({}deg) scale({}, {})",
            self.x, self.y, self.rotation, sx, sy
        )
    }

    /// Check numeric ranges and that `value` has the shape its `kind` expects.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(CoreError::Validation(format!(
                "Overlay opacity must be between 0 and 1, got {}",
                self.opacity
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(CoreError::Validation(format!(
                "Overlay scale must be a positive number, got {}",
                self.scale
            )));
        }
        if ![self.x, self.y, self.rotation].iter().all(|v| v.is_finite()) {
            return Err(CoreError::Validation(
                "Overlay position and rotation must be finite".into(),
            ));
        }
        validate_value(self.kind, &self.value)
    }
}

/// Check that `value` matches what `kind` renders.
///
/// Image overlays need something an `<img>` can load: an absolute http(s)
/// URL, a root-relative path or an image data URI. CSS overlays need a
/// non-empty expression; a bare URL is rejected because it paints nothing.
pub fn validate_value(kind: OverlayKind, value: &str) -> Result<(), CoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::Validation("Overlay value must not be empty".into()));
    }

    let is_url = value.starts_with("http://") || value.starts_with("https://");
    match kind {
        OverlayKind::Image => {
            if is_url || value.starts_with('/') || value.starts_with("data:image/") {
                Ok(())
            } else {
                Err(CoreError::Validation(format!(
                    "Image overlay value must be a URL, path or image data URI, got '{value}'"
                )))
            }
        }
        OverlayKind::Css => {
            if is_url {
                Err(CoreError::Validation(
                    "CSS overlay value must be a CSS expression, not a bare URL".into(),
                ))
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_overlay_has_neutral_placement() {
        let overlay = Overlay::new(OverlayKind::Css, "linear-gradient(red, blue)");
        assert!(!overlay.id.is_empty());
        assert_eq!(overlay.blend_mode, BlendMode::Normal);
        assert_eq!(overlay.opacity, 1.0);
        assert_eq!(overlay.scale, 1.0);
        assert!(!overlay.flip_h && !overlay.flip_v);
        assert!(overlay.validate().is_ok());
    }

    #[test]
    fn new_overlays_get_distinct_ids() {
        let a = Overlay::new(OverlayKind::Css, "red");
        let b = Overlay::new(OverlayKind::Css, "red");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn apply_touches_only_present_fields() {
        let mut overlay = Overlay::new(OverlayKind::Image, "https://cdn.example.com/a.png");
        overlay.apply(&OverlayPatch {
            opacity: Some(0.4),
            blend_mode: Some(BlendMode::Multiply),
            ..Default::default()
        });
        assert_eq!(overlay.opacity, 0.4);
        assert_eq!(overlay.blend_mode, BlendMode::Multiply);
        assert_eq!(overlay.scale, 1.0);
        assert_eq!(overlay.x, 0.0);
        assert!(!overlay.flip_h);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let mut overlay = Overlay::new(OverlayKind::Css, "radial-gradient(#fff, #000)");
        overlay.blend_mode = BlendMode::ColorDodge;
        overlay.flip_h = true;
        let json = serde_json::to_value(&overlay).unwrap();
        assert_eq!(json["type"], "css");
        assert_eq!(json["blendMode"], "color-dodge");
        assert_eq!(json["flipH"], true);
        assert_eq!(json["flipV"], false);

        let back: Overlay = serde_json::from_value(json).unwrap();
        assert_eq!(back, overlay);
    }

    #[test]
    fn unknown_blend_mode_is_rejected_on_deserialize() {
        let result = serde_json::from_str::<BlendMode>("\"luminosity\"");
        assert!(result.is_err());
    }

    #[test]
    fn every_blend_mode_serializes_as_its_css_name() {
        for mode in BlendMode::ALL {
            let json = serde_json::to_value(mode).unwrap();
            assert_eq!(json, mode.css_name());
        }
    }

    #[test]
    fn patch_omits_absent_fields() {
        let patch = OverlayPatch {
            flip_v: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "flipV": true }));
    }

    #[test]
    fn css_transform_renders_flips_as_negative_scale() {
        let mut overlay = Overlay::new(OverlayKind::Css, "red");
        overlay.x = 10.0;
        overlay.y = -5.0;
        overlay.rotation = 45.0;
        overlay.scale = 2.0;
        overlay.flip_h = true;
        assert_eq!(
            overlay.css_transform(),
            "translate(10px, -5px) rotate(45deg) scale(-2, 2)"
        );
    }

    #[test]
    fn opacity_out_of_range_is_invalid() {
        let mut overlay = Overlay::new(OverlayKind::Css, "red");
        overlay.opacity = 1.5;
        assert!(overlay.validate().is_err());
        overlay.opacity = -0.1;
        assert!(overlay.validate().is_err());
    }

    #[test]
    fn non_positive_scale_is_invalid() {
        let mut overlay = Overlay::new(OverlayKind::Css, "red");
        overlay.scale = 0.0;
        assert!(overlay.validate().is_err());
        overlay.scale = f64::INFINITY;
        assert!(overlay.validate().is_err());
    }

    #[test]
    fn image_value_must_be_loadable() {
        assert!(validate_value(OverlayKind::Image, "https://cdn.example.com/grain.png").is_ok());
        assert!(validate_value(OverlayKind::Image, "/api/files/sets/1/grain.png").is_ok());
        assert!(validate_value(OverlayKind::Image, "data:image/png;base64,AAAA").is_ok());
        assert!(validate_value(OverlayKind::Image, "linear-gradient(red, blue)").is_err());
    }

    #[test]
    fn css_value_must_not_be_bare_url() {
        assert!(validate_value(OverlayKind::Css, "linear-gradient(red, blue)").is_ok());
        assert!(validate_value(OverlayKind::Css, "url(/a.png) center / cover").is_ok());
        assert!(validate_value(OverlayKind::Css, "https://cdn.example.com/a.png").is_err());
        assert!(validate_value(OverlayKind::Css, "   ").is_err());
    }

    #[test]
    fn kind_round_trips_through_name() {
        assert_eq!(OverlayKind::from_name("css").unwrap(), OverlayKind::Css);
        assert_eq!(OverlayKind::from_name(OverlayKind::Image.as_str()).unwrap(), OverlayKind::Image);
        assert!(OverlayKind::from_name("video").is_err());
    }
}
