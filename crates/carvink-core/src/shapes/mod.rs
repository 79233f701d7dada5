//! Path primitives for the drawing surface.

mod clip;
mod path;

pub use clip::{Clipped, clip_polygon};
pub use path::{CurveLocation, Path, Segment};

use peniko::Color;
use peniko::color::Srgb;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for paths.
pub type PathId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse any CSS color: hex notation, named colors or functional forms.
    pub fn parse_css(color: &str) -> Option<Self> {
        let parsed = peniko::color::parse_color(color.trim()).ok()?;
        Some(parsed.to_alpha_color::<Srgb>().into())
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Build from unit-range float channels, as written by vector editors.
    pub fn from_unit_rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        let to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b), to_u8(a))
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Shape drawn at the open ends of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Default fill for new paths (orange 500).
pub const DEFAULT_FILL_COLOR: SerializableColor = SerializableColor::new(0xF9, 0x73, 0x16, 255);
/// Default stroke for new paths (amber 700).
pub const DEFAULT_STROKE_COLOR: SerializableColor = SerializableColor::new(0xB4, 0x53, 0x09, 255);
/// Default stroke width for new paths.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Style properties for paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    /// Stroke color (None = no stroke).
    pub stroke_color: Option<SerializableColor>,
    /// Stroke width.
    pub stroke_width: f64,
    /// Stroke cap.
    #[serde(default)]
    pub stroke_cap: StrokeCap,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            fill_color: Some(DEFAULT_FILL_COLOR),
            stroke_color: Some(DEFAULT_STROKE_COLOR),
            stroke_width: DEFAULT_STROKE_WIDTH,
            stroke_cap: StrokeCap::Round,
        }
    }
}
