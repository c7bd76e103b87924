//! Web container creation tool.

use super::{DraggableShapeTool, FactoryConfig, ShapeFactory};
use crate::shapes::{DEFAULT_WEB_CONTAINER_URL, ShapeKind, ShapeProps, WebContainerProps};
use kurbo::Size;

/// Tool id of the web container tool.
pub const WEB_CONTAINER_TOOL: &str = "web-container";

/// Drag-to-create tool for web containers.
pub type WebContainerTool = DraggableShapeTool<WebContainerFactory>;

/// Builds web container props.
#[derive(Debug, Clone, PartialEq)]
pub struct WebContainerFactory {
    config: FactoryConfig,
    /// Page loaded by new containers.
    url: String,
}

impl WebContainerFactory {
    pub fn new(config: FactoryConfig, url: impl Into<String>) -> Self {
        Self {
            config,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for WebContainerFactory {
    fn default() -> Self {
        Self::new(
            FactoryConfig::new(Size::new(400.0, 300.0), Size::new(100.0, 80.0), 0.3),
            DEFAULT_WEB_CONTAINER_URL,
        )
    }
}

impl ShapeFactory for WebContainerFactory {
    fn kind(&self) -> ShapeKind {
        ShapeKind::WebContainer
    }

    fn config(&self) -> &FactoryConfig {
        &self.config
    }

    fn create_props(&self, _x: f64, _y: f64, width: f64, height: f64) -> ShapeProps {
        ShapeProps::WebContainer(WebContainerProps::with_url(width, height, self.url.clone()))
    }
}
