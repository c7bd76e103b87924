//! Contract between tools and the host canvas engine.

use crate::shapes::{ShapeDescriptor, ShapeId, ShapePatch};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Built-in editing modes of the host engine.
pub mod modes {
    /// Default mode: selecting, moving and resizing shapes.
    pub const SELECT: &str = "select";
    /// Panning the viewport.
    pub const HAND: &str = "hand";
    /// Placing text.
    pub const TEXT: &str = "text";

    pub const BUILTIN: [&str; 3] = [SELECT, HAND, TEXT];
}

/// Pointer cursor requested by the active tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cursor {
    #[default]
    Default,
    /// Crosshair shown by creation tools.
    Cross,
}

/// Operations a tool may perform on the host engine.
///
/// Every call is synchronous and runs on the engine's event loop.
pub trait Editor {
    /// Convert a device-space point to document space.
    fn to_document_space(&self, point: Point) -> Point;

    /// Create an object and return its id.
    fn create_object(&mut self, descriptor: ShapeDescriptor) -> ShapeId;

    /// Update an existing object in place. Returns false if it does not exist.
    fn update_object(&mut self, id: ShapeId, patch: ShapePatch) -> bool;

    /// Delete objects. Unknown ids are ignored.
    fn delete_objects(&mut self, ids: &[ShapeId]);

    /// Switch the engine's active mode (a built-in mode or a tool id).
    fn set_active_mode(&mut self, mode: &str);

    /// Currently active mode.
    fn active_mode(&self) -> &str;

    fn set_cursor(&mut self, cursor: Cursor);
}
