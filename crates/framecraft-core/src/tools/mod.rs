//! Tool system: shape-creation tools and the registry that dispatches to them.

mod draggable;
mod dynamic_background;
mod factory;
mod registry;
mod web_container;

pub use draggable::{DraggableShapeTool, GestureState};
pub use dynamic_background::{DYNAMIC_BACKGROUND_TOOL, DynamicBackgroundFactory, DynamicBackgroundTool};
pub use factory::{FactoryConfig, ShapeFactory};
pub use registry::{
    IMAGE_TOOL, Icon, SideAction, ToolAction, ToolCatalogue, ToolEntry, ToolRegistry, VariantGroup,
};
pub use web_container::{WEB_CONTAINER_TOOL, WebContainerFactory, WebContainerTool};

use crate::editor::Editor;
use crate::input::ToolEvent;
use kurbo::Point;
use thiserror::Error;

/// Tool errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Tool {tool} has no variant {variant:?}")]
    UnknownVariant { tool: String, variant: String },
    #[error("Invalid geometry: {width}x{height}")]
    InvalidGeometry { width: f64, height: f64 },
}

/// An interactive tool driven by the host engine's event loop.
///
/// Hooks never fail: every problem degrades to "nothing created".
pub trait Tool {
    /// Identifier used for registration and as the engine mode name.
    fn id(&self) -> &'static str;

    /// Tool became the active mode.
    fn on_enter(&mut self, editor: &mut dyn Editor);

    /// Tool stopped being the active mode.
    fn on_exit(&mut self, editor: &mut dyn Editor);

    fn on_pointer_down(&mut self, editor: &mut dyn Editor, point: Point);

    fn on_pointer_move(&mut self, editor: &mut dyn Editor, point: Point);

    fn on_pointer_up(&mut self, editor: &mut dyn Editor, point: Point);

    fn on_click(&mut self, editor: &mut dyn Editor, point: Point);

    fn on_key_down(&mut self, editor: &mut dyn Editor, key: &str);

    /// Host-initiated cancel (focus loss, interrupt).
    fn on_cancel(&mut self, editor: &mut dyn Editor);

    /// Whether a gesture is in progress.
    fn is_dragging(&self) -> bool;

    /// Switch a multi-variant tool to the named variant.
    fn select_variant(&mut self, _variant: &str) -> bool {
        false
    }

    /// Route a disambiguated input event to the matching hook.
    fn handle_event(&mut self, editor: &mut dyn Editor, event: ToolEvent) {
        match event {
            ToolEvent::PointerDown(point) => self.on_pointer_down(editor, point),
            ToolEvent::PointerMove(point) => self.on_pointer_move(editor, point),
            ToolEvent::PointerUp(point) => self.on_pointer_up(editor, point),
            ToolEvent::Click(point) => self.on_click(editor, point),
            ToolEvent::KeyDown(key) => self.on_key_down(editor, &key),
        }
    }
}
