//! Dynamic background creation tool.

use super::{DraggableShapeTool, FactoryConfig, ShapeFactory};
use crate::shapes::{BackgroundType, DynamicBackgroundProps, ShapeKind, ShapeProps};
use kurbo::Size;

/// Tool id of the dynamic background tool.
pub const DYNAMIC_BACKGROUND_TOOL: &str = "dynamic-background";

/// Drag-to-create tool for dynamic backgrounds.
pub type DynamicBackgroundTool = DraggableShapeTool<DynamicBackgroundFactory>;

/// Builds dynamic background props of the currently selected variant.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicBackgroundFactory {
    config: FactoryConfig,
    background_type: BackgroundType,
}

impl DynamicBackgroundFactory {
    pub fn new(config: FactoryConfig, background_type: BackgroundType) -> Self {
        Self {
            config,
            background_type,
        }
    }

    pub fn background_type(&self) -> BackgroundType {
        self.background_type
    }

    pub fn set_background_type(&mut self, background_type: BackgroundType) {
        self.background_type = background_type;
    }
}

impl Default for DynamicBackgroundFactory {
    fn default() -> Self {
        Self::new(
            FactoryConfig::new(Size::new(600.0, 400.0), Size::new(50.0, 50.0), 0.3),
            BackgroundType::default(),
        )
    }
}

impl ShapeFactory for DynamicBackgroundFactory {
    fn kind(&self) -> ShapeKind {
        ShapeKind::DynamicBackground
    }

    fn config(&self) -> &FactoryConfig {
        &self.config
    }

    fn create_props(&self, _x: f64, _y: f64, width: f64, height: f64) -> ShapeProps {
        ShapeProps::DynamicBackground(DynamicBackgroundProps::new(width, height, self.background_type))
    }

    fn select_variant(&mut self, variant: &str) -> bool {
        match variant.parse::<BackgroundType>() {
            Ok(background_type) => {
                log::debug!("background variant -> {}", background_type.as_str());
                self.background_type = background_type;
                true
            }
            Err(err) => {
                log::warn!("{err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::editor::Editor;
    use crate::tools::Tool;
    use kurbo::Point;

    fn committed_type(canvas: &Canvas) -> BackgroundType {
        canvas
            .document
            .committed()
            .next()
            .and_then(|s| s.props.as_dynamic_background())
            .map(DynamicBackgroundProps::background_type)
            .unwrap()
    }

    #[test]
    fn test_click_uses_selected_variant() {
        let mut canvas = Canvas::new();
        let mut tool = DynamicBackgroundTool::new(DynamicBackgroundFactory::default());
        assert!(tool.select_variant("heatmap"));
        canvas.set_active_mode(DYNAMIC_BACKGROUND_TOOL);
        tool.on_click(&mut canvas, Point::new(300.0, 200.0));

        assert_eq!(committed_type(&canvas), BackgroundType::Heatmap);
        let shape = canvas.document.committed().next().unwrap();
        assert!(shape.position.x.abs() < f64::EPSILON);
        assert!(shape.position.y.abs() < f64::EPSILON);
        assert!((shape.width - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_variant_keeps_current() {
        let mut tool = DynamicBackgroundTool::new(DynamicBackgroundFactory::default());
        assert!(!tool.select_variant("plasma"));
        assert_eq!(tool.factory().background_type(), BackgroundType::GradientFlow);
    }

    #[test]
    fn test_minimum_is_inclusive() {
        let mut canvas = Canvas::new();
        let mut tool = DynamicBackgroundTool::new(DynamicBackgroundFactory::default());
        tool.on_pointer_down(&mut canvas, Point::new(0.0, 0.0));
        tool.on_pointer_up(&mut canvas, Point::new(50.0, 50.0));
        assert_eq!(canvas.document.committed().count(), 1);
        assert_eq!(committed_type(&canvas), BackgroundType::GradientFlow);
    }

    #[test]
    fn test_preview_carries_variant() {
        let mut canvas = Canvas::new();
        let mut factory = DynamicBackgroundFactory::default();
        factory.set_background_type(BackgroundType::GrainGradient);
        let mut tool = DynamicBackgroundTool::new(factory);
        tool.on_pointer_down(&mut canvas, Point::new(0.0, 0.0));

        let preview = canvas.document.previews().next().unwrap();
        let props = preview.props.as_dynamic_background().unwrap();
        assert_eq!(props.background_type(), BackgroundType::GrainGradient);
    }
}
