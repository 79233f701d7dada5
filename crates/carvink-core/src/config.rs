//! Host-supplied configuration.

use crate::hit_test::{DEFAULT_HIT_TOLERANCE, LAYERED_HIT_TOLERANCE};
use crate::layers::LayerRoles;
use crate::shapes::{
    DEFAULT_FILL_COLOR, DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, PathStyle, SerializableColor,
    StrokeCap,
};
use crate::tools::DrawingMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum distance between sampled points.
pub const DEFAULT_DRAW_RESOLUTION: f64 = 1.0;
/// Default segment floor below which a path is discarded.
pub const DEFAULT_MINIMUM_POINTS_PER_PATH: usize = 3;
/// Default name of the outbound persist event.
pub const DEFAULT_PERSIST_EVENT_NAME: &str = "persist_drawing";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Configuration read from the host at mount and on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasConfig {
    /// Select or pen.
    pub drawing_mode: DrawingMode,
    /// Minimum distance between sampled points when drawing.
    pub draw_resolution: f64,
    /// Hit tolerance; falls back to the variant's default when unset.
    pub hit_tolerance: Option<f64>,
    /// Paths with fewer segments than this are discarded.
    pub minimum_points_per_path: usize,
    /// Serialized document to load at mount.
    pub drawing_content: Option<String>,
    /// Layer receiving new paths.
    pub active_layer: Option<String>,
    #[serde(with = "css_color")]
    pub fill_color: SerializableColor,
    #[serde(with = "css_color")]
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
    /// Name of the outbound persist event.
    pub persist_event_name: String,
    /// Reserved layer names; presence selects the layered surface.
    pub layers: Option<LayerRoles>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            drawing_mode: DrawingMode::default(),
            draw_resolution: DEFAULT_DRAW_RESOLUTION,
            hit_tolerance: None,
            minimum_points_per_path: DEFAULT_MINIMUM_POINTS_PER_PATH,
            drawing_content: None,
            active_layer: None,
            fill_color: DEFAULT_FILL_COLOR,
            stroke_color: DEFAULT_STROKE_COLOR,
            stroke_width: DEFAULT_STROKE_WIDTH,
            persist_event_name: DEFAULT_PERSIST_EVENT_NAME.to_string(),
            layers: None,
        }
    }
}

impl CanvasConfig {
    /// Configuration for the layered surface with the default layer names.
    pub fn layered() -> Self {
        Self {
            layers: Some(LayerRoles::default()),
            ..Self::default()
        }
    }

    /// Parse and validate a configuration blob.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.draw_resolution.is_finite() && self.draw_resolution >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "drawResolution",
                reason: format!("{} is not a non-negative number", self.draw_resolution),
            });
        }
        if let Some(tolerance) = self.hit_tolerance {
            if !(tolerance.is_finite() && tolerance >= 0.0) {
                return Err(ConfigError::Invalid {
                    field: "hitTolerance",
                    reason: format!("{tolerance} is not a non-negative number"),
                });
            }
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "strokeWidth",
                reason: format!("{} is not a non-negative number", self.stroke_width),
            });
        }
        if let Some(roles) = &self.layers {
            roles.validate()?;
        }
        Ok(())
    }

    /// Hit tolerance in effect.
    pub fn hit_tolerance(&self) -> f64 {
        self.hit_tolerance.unwrap_or(if self.layers.is_some() {
            LAYERED_HIT_TOLERANCE
        } else {
            DEFAULT_HIT_TOLERANCE
        })
    }

    /// Style given to new paths.
    pub fn path_style(&self) -> PathStyle {
        PathStyle {
            fill_color: Some(self.fill_color),
            stroke_color: Some(self.stroke_color),
            stroke_width: self.stroke_width,
            stroke_cap: StrokeCap::Round,
        }
    }
}

/// Serde adapter reading any CSS color and writing hex.
mod css_color {
    use crate::shapes::SerializableColor;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(color: &SerializableColor, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<SerializableColor, D::Error> {
        let css = String::deserialize(d)?;
        SerializableColor::parse_css(&css)
            .ok_or_else(|| D::Error::custom(format!("invalid color {css:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CanvasConfig::default();
        assert_eq!(config.drawing_mode, DrawingMode::Select);
        assert_eq!(config.minimum_points_per_path, 3);
        assert!((config.hit_tolerance() - 5.0).abs() < f64::EPSILON);
        assert!((CanvasConfig::layered().hit_tolerance() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json() {
        let config = CanvasConfig::from_json(
            r##"{
                "drawingMode": "pen",
                "drawResolution": 2.5,
                "activeLayer": "carving",
                "fillColor": "#000",
                "layers": {"base": "pumpkin", "decoration": "decoration", "constrained": "carving"}
            }"##,
        )
        .unwrap();

        assert_eq!(config.drawing_mode, DrawingMode::Pen);
        assert!((config.draw_resolution - 2.5).abs() < f64::EPSILON);
        assert_eq!(config.active_layer.as_deref(), Some("carving"));
        assert_eq!(config.fill_color, SerializableColor::black());
        assert_eq!(config.stroke_color, DEFAULT_STROKE_COLOR);
        assert!((config.hit_tolerance() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_explicit_tolerance_wins() {
        let config = CanvasConfig {
            hit_tolerance: Some(8.0),
            ..CanvasConfig::layered()
        };
        assert!((config.hit_tolerance() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            CanvasConfig::from_json(r#"{"drawResolution": -1}"#),
            Err(ConfigError::Invalid { field: "drawResolution", .. })
        ));
        assert!(matches!(
            CanvasConfig::from_json(r#"{"fillColor": "pumpkin-ish"}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            CanvasConfig::from_json(
                r#"{"layers": {"base": "a", "decoration": "a", "constrained": "b"}}"#
            ),
            Err(ConfigError::Invalid { field: "layers", .. })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = CanvasConfig::layered();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"fillColor\":\"#f97316\""));
        assert_eq!(CanvasConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_named_colors() {
        let config = CanvasConfig::from_json(r#"{"strokeColor": "orange"}"#).unwrap();
        assert_eq!(config.stroke_color, SerializableColor::new(255, 165, 0, 255));
    }
}
