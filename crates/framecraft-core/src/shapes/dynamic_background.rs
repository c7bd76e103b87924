//! Dynamic background: an animated panel with several visual variants.

use super::SerializableColor;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Style validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} is not a valid color: {value:?}")]
    InvalidColor { field: &'static str, value: String },
    #[error("{field} is not a valid url: {value:?}")]
    InvalidUrl { field: &'static str, value: String },
    #[error("Unknown background type: {0}")]
    UnknownBackgroundType(String),
}

/// Visual variant of a dynamic background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundType {
    #[default]
    GradientFlow,
    Heatmap,
    GrainGradient,
}

impl BackgroundType {
    pub const ALL: [BackgroundType; 3] = [
        BackgroundType::GradientFlow,
        BackgroundType::Heatmap,
        BackgroundType::GrainGradient,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundType::GradientFlow => "gradient-flow",
            BackgroundType::Heatmap => "heatmap",
            BackgroundType::GrainGradient => "grain-gradient",
        }
    }

    /// Human readable name for menus.
    pub fn label(&self) -> &'static str {
        match self {
            BackgroundType::GradientFlow => "Gradient Flow",
            BackgroundType::Heatmap => "Heatmap",
            BackgroundType::GrainGradient => "Grain Gradient",
        }
    }
}

impl FromStr for BackgroundType {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BackgroundType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| StyleError::UnknownBackgroundType(s.to_string()))
    }
}

/// Cell shape of the grain gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrainShape {
    Wave,
    Dots,
    Truchet,
    Corners,
    Ripple,
    Blob,
    #[default]
    Sphere,
}

/// Heatmap-specific style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapStyle {
    /// Comma separated `#rrggbb` stops.
    pub colors: String,
    pub color_back: String,
    pub contour: f64,
    /// Degrees.
    pub angle: f64,
    pub noise: f64,
    pub inner_glow: f64,
    pub outer_glow: f64,
    pub scale: f64,
    /// Mask image.
    pub image: String,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            colors: "#112069,#1f3ca3,#3265e7,#6bd8ff,#ffe77a,#ff9a1f,#ff4d00".to_string(),
            color_back: "#000000".to_string(),
            contour: 0.5,
            angle: 0.0,
            noise: 0.0,
            inner_glow: 0.5,
            outer_glow: 0.5,
            scale: 0.75,
            image: "https://shaders.paper.design/images/logos/diamond.svg".to_string(),
        }
    }
}

impl HeatmapStyle {
    fn validate(&self) -> Result<(), StyleError> {
        check_color_list("heatmap.colors", &self.colors)?;
        check_color("heatmap.color_back", &self.color_back)?;
        check_range("heatmap.contour", self.contour, 0.0, 1.0)?;
        check_range("heatmap.angle", self.angle, 0.0, 360.0)?;
        check_range("heatmap.noise", self.noise, 0.0, 1.0)?;
        check_range("heatmap.inner_glow", self.inner_glow, 0.0, 1.0)?;
        check_range("heatmap.outer_glow", self.outer_glow, 0.0, 1.0)?;
        check_range("heatmap.scale", self.scale, 0.01, 4.0)?;
        if Url::parse(&self.image).is_err() {
            return Err(StyleError::InvalidUrl {
                field: "heatmap.image",
                value: self.image.clone(),
            });
        }
        Ok(())
    }
}

/// Grain gradient-specific style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrainGradientStyle {
    /// Comma separated `#rrggbb` stops.
    pub colors: String,
    pub color_back: String,
    pub softness: f64,
    pub intensity: f64,
    pub noise: f64,
    pub shape: GrainShape,
}

impl Default for GrainGradientStyle {
    fn default() -> Self {
        Self {
            colors: "#702200,#eaba7b,#38b422".to_string(),
            color_back: "#0a0000".to_string(),
            softness: 0.0,
            intensity: 0.2,
            noise: 1.0,
            shape: GrainShape::default(),
        }
    }
}

impl GrainGradientStyle {
    fn validate(&self) -> Result<(), StyleError> {
        check_color_list("grain.colors", &self.colors)?;
        check_color("grain.color_back", &self.color_back)?;
        check_range("grain.softness", self.softness, 0.0, 1.0)?;
        check_range("grain.intensity", self.intensity, 0.0, 1.0)?;
        check_range("grain.noise", self.noise, 0.0, 1.0)
    }
}

/// Per-variant style block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "background_type", rename_all = "kebab-case")]
pub enum BackgroundVariant {
    GradientFlow,
    Heatmap(HeatmapStyle),
    GrainGradient(GrainGradientStyle),
}

impl BackgroundVariant {
    /// Variant block with default style values.
    pub fn defaults_for(background_type: BackgroundType) -> Self {
        match background_type {
            BackgroundType::GradientFlow => BackgroundVariant::GradientFlow,
            BackgroundType::Heatmap => BackgroundVariant::Heatmap(HeatmapStyle::default()),
            BackgroundType::GrainGradient => {
                BackgroundVariant::GrainGradient(GrainGradientStyle::default())
            }
        }
    }

    pub fn background_type(&self) -> BackgroundType {
        match self {
            BackgroundVariant::GradientFlow => BackgroundType::GradientFlow,
            BackgroundVariant::Heatmap(_) => BackgroundType::Heatmap,
            BackgroundVariant::GrainGradient(_) => BackgroundType::GrainGradient,
        }
    }
}

/// Properties of a dynamic background shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicBackgroundProps {
    pub w: f64,
    pub h: f64,
    /// Multiplier on the base animation rate.
    pub animation_speed: f64,
    pub primary_color: String,
    pub secondary_color: String,
    pub variant: BackgroundVariant,
}

impl DynamicBackgroundProps {
    pub const MIN_ANIMATION_SPEED: f64 = 0.1;
    pub const MAX_ANIMATION_SPEED: f64 = 3.0;

    pub fn new(w: f64, h: f64, background_type: BackgroundType) -> Self {
        Self {
            w,
            h,
            animation_speed: 1.0,
            primary_color: "#3b82f6".to_string(),
            secondary_color: "#8b5cf6".to_string(),
            variant: BackgroundVariant::defaults_for(background_type),
        }
    }

    pub fn background_type(&self) -> BackgroundType {
        self.variant.background_type()
    }

    /// Primary color for rendering, if it parses.
    pub fn primary(&self) -> Option<Color> {
        SerializableColor::from_hex(&self.primary_color).map(Color::from)
    }

    pub fn secondary(&self) -> Option<Color> {
        SerializableColor::from_hex(&self.secondary_color).map(Color::from)
    }

    /// Check every style value against its allowed range.
    pub fn validate(&self) -> Result<(), StyleError> {
        check_range(
            "animation_speed",
            self.animation_speed,
            Self::MIN_ANIMATION_SPEED,
            Self::MAX_ANIMATION_SPEED,
        )?;
        check_color("primary_color", &self.primary_color)?;
        check_color("secondary_color", &self.secondary_color)?;
        match &self.variant {
            BackgroundVariant::GradientFlow => Ok(()),
            BackgroundVariant::Heatmap(style) => style.validate(),
            BackgroundVariant::GrainGradient(style) => style.validate(),
        }
    }
}

impl Default for DynamicBackgroundProps {
    fn default() -> Self {
        Self::new(600.0, 400.0, BackgroundType::default())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), StyleError> {
    // NaN fails both comparisons and is rejected too
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(StyleError::OutOfRange { field, value, min, max })
    }
}

fn check_color(field: &'static str, value: &str) -> Result<(), StyleError> {
    SerializableColor::from_hex(value)
        .map(|_| ())
        .ok_or_else(|| StyleError::InvalidColor {
            field,
            value: value.to_string(),
        })
}

fn check_color_list(field: &'static str, value: &str) -> Result<(), StyleError> {
    value
        .split(',')
        .try_for_each(|stop| check_color(field, stop.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        for background_type in BackgroundType::ALL {
            let props = DynamicBackgroundProps::new(600.0, 400.0, background_type);
            assert_eq!(props.background_type(), background_type);
            assert_eq!(props.validate(), Ok(()));
        }
    }

    #[test]
    fn test_render_colors() {
        let mut props = DynamicBackgroundProps::default();
        let primary = props.primary().unwrap().to_rgba8();
        assert_eq!((primary.r, primary.g, primary.b), (0x3b, 0x82, 0xf6));
        assert!(props.secondary().is_some());

        props.primary_color = "blue".to_string();
        assert!(props.primary().is_none());
    }

    #[test]
    fn test_background_type_parse() {
        assert_eq!("heatmap".parse::<BackgroundType>(), Ok(BackgroundType::Heatmap));
        assert_eq!(
            "grain-gradient".parse::<BackgroundType>(),
            Ok(BackgroundType::GrainGradient)
        );
        assert!(matches!(
            "plasma".parse::<BackgroundType>(),
            Err(StyleError::UnknownBackgroundType(_))
        ));
    }

    #[test]
    fn test_animation_speed_range() {
        let mut props = DynamicBackgroundProps::default();
        props.animation_speed = 3.0;
        assert!(props.validate().is_ok());
        props.animation_speed = 3.5;
        assert!(matches!(
            props.validate(),
            Err(StyleError::OutOfRange { field: "animation_speed", .. })
        ));
        props.animation_speed = f64::NAN;
        assert!(props.validate().is_err());
    }

    #[test]
    fn test_heatmap_ranges() {
        let mut style = HeatmapStyle::default();
        style.angle = 361.0;
        let mut props = DynamicBackgroundProps::default();
        props.variant = BackgroundVariant::Heatmap(style);
        assert!(matches!(
            props.validate(),
            Err(StyleError::OutOfRange { field: "heatmap.angle", .. })
        ));
    }

    #[test]
    fn test_grain_color_list() {
        let style = GrainGradientStyle {
            colors: "#702200, nope".to_string(),
            ..GrainGradientStyle::default()
        };
        let mut props = DynamicBackgroundProps::default();
        props.variant = BackgroundVariant::GrainGradient(style);
        assert!(matches!(props.validate(), Err(StyleError::InvalidColor { .. })));
    }

    #[test]
    fn test_variant_serde() {
        let props = DynamicBackgroundProps::new(10.0, 10.0, BackgroundType::GrainGradient);
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["variant"]["background_type"], "grain-gradient");
        assert_eq!(json["variant"]["shape"], "sphere");
        let back: DynamicBackgroundProps = serde_json::from_value(json).unwrap();
        assert_eq!(back, props);
    }
}
