//! Per-kind configuration consumed by the generic creation tool.

use crate::shapes::{PREVIEW_OPACITY_THRESHOLD, ShapeKind, ShapeProps};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Sizes and preview look shared by every shape factory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactoryConfig {
    /// Size of shapes created by a click.
    pub default_size: Size,
    /// Smallest drag that still creates a shape (both axes, inclusive).
    pub minimum_size: Size,
    /// Opacity of the drag preview; must stay below the preview threshold.
    pub preview_opacity: f64,
}

impl FactoryConfig {
    pub fn new(default_size: Size, minimum_size: Size, preview_opacity: f64) -> Self {
        Self {
            default_size,
            minimum_size,
            preview_opacity,
        }
    }

    /// Whether the values can drive a creation tool.
    pub fn is_valid(&self) -> bool {
        let finite_non_negative = |s: Size| {
            s.width.is_finite() && s.height.is_finite() && s.width >= 0.0 && s.height >= 0.0
        };
        finite_non_negative(self.default_size)
            && finite_non_negative(self.minimum_size)
            && (0.0..PREVIEW_OPACITY_THRESHOLD).contains(&self.preview_opacity)
    }
}

/// Describes how to build one kind of shape.
///
/// The creation tool is generic over this trait; every concrete tool is a
/// `DraggableShapeTool` holding a factory value.
pub trait ShapeFactory {
    fn kind(&self) -> ShapeKind;

    fn config(&self) -> &FactoryConfig;

    fn default_size(&self) -> Size {
        self.config().default_size
    }

    fn minimum_size(&self) -> Size {
        self.config().minimum_size
    }

    fn preview_opacity(&self) -> f64 {
        self.config().preview_opacity
    }

    /// Build the property bag for a shape at `(x, y)` with the given size.
    ///
    /// Must return a bag of this factory's kind for any non-negative size.
    fn create_props(&self, x: f64, y: f64, width: f64, height: f64) -> ShapeProps;

    /// Switch to a named variant. Single-variant factories refuse.
    fn select_variant(&mut self, _variant: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validity() {
        let config = FactoryConfig::new(Size::new(400.0, 300.0), Size::new(100.0, 80.0), 0.3);
        assert!(config.is_valid());

        let solid = FactoryConfig {
            preview_opacity: 0.9,
            ..config
        };
        assert!(!solid.is_valid());

        let negative = FactoryConfig {
            minimum_size: Size::new(-1.0, 80.0),
            ..config
        };
        assert!(!negative.is_valid());

        let infinite = FactoryConfig {
            default_size: Size::new(f64::INFINITY, 1.0),
            ..config
        };
        assert!(!infinite.is_valid());
    }
}
