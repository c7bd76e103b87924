//! FrameCraft Core Library
//!
//! Interactive shape creation for a canvas editor: drag-to-create tools,
//! the shape factories behind them and the registry that dispatches toolbar
//! ids, written against a small host-engine contract.

pub mod camera;
pub mod canvas;
pub mod editor;
pub mod input;
pub mod session;
pub mod settings;
pub mod shapes;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, CanvasDocument};
pub use editor::{Cursor, Editor, modes};
pub use input::{GestureRecognizer, KeyEvent, MouseButton, PointerEvent, ToolEvent};
pub use session::EditingSession;
pub use settings::{Settings, SettingsError};
pub use shapes::{Shape, ShapeDescriptor, ShapeId, ShapeKind, ShapePatch, ShapeProps};
pub use tools::{Tool, ToolAction, ToolError, ToolRegistry};
