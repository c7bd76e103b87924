//! Generic drag-to-create tool.
//!
//! A press-drag-release draws a translucent preview that follows the pointer
//! and is replaced by a solid shape on release, provided the dragged
//! rectangle reaches the factory's minimum size. A plain click creates a
//! default-size shape centered on the pointer instead. Escape cancels.

use super::{ShapeFactory, Tool, ToolError};
use crate::editor::{Cursor, Editor, modes};
use crate::input::ESCAPE;
use crate::shapes::{SOLID_OPACITY, ShapeDescriptor, ShapeId, ShapePatch, ShapeProps};
use kurbo::{Point, Rect, Size};

/// Gesture state of a creation tool.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        /// Press position in device space.
        start: Point,
        /// The live preview shape.
        preview: ShapeId,
    },
}

/// Creation tool for the shape kind described by `F`.
#[derive(Debug, Clone)]
pub struct DraggableShapeTool<F> {
    factory: F,
    state: GestureState,
}

impl<F: ShapeFactory> DraggableShapeTool<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            state: GestureState::Idle,
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Id of the live preview, if a drag is in progress.
    pub fn preview_id(&self) -> Option<ShapeId> {
        match self.state {
            GestureState::Dragging { preview, .. } => Some(preview),
            GestureState::Idle => None,
        }
    }

    /// Delete the live preview (if any) and return to idle.
    fn discard_preview(&mut self, editor: &mut dyn Editor) {
        if let GestureState::Dragging { preview, .. } = std::mem::take(&mut self.state) {
            editor.delete_objects(&[preview]);
        }
    }

    /// Document-space rectangle spanned by two device-space points.
    fn drag_rect(&self, editor: &dyn Editor, start: Point, end: Point) -> Result<Rect, ToolError> {
        let a = editor.to_document_space(start);
        let b = editor.to_document_space(end);
        let rect = Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y));
        ensure_finite(rect)
    }

    /// Props for a rectangle, rejecting bags with unusable dimensions.
    fn props_for(&self, rect: Rect) -> Result<ShapeProps, ToolError> {
        let props = self.factory.create_props(rect.x0, rect.y0, rect.width(), rect.height());
        if props.has_valid_size() {
            Ok(props)
        } else {
            let size = props.size();
            Err(ToolError::InvalidGeometry {
                width: size.width,
                height: size.height,
            })
        }
    }

    /// Both axes must reach the minimum; zero-area drags never qualify.
    fn meets_minimum(&self, rect: Rect) -> bool {
        let min = self.factory.minimum_size();
        rect.width() > 0.0
            && rect.height() > 0.0
            && rect.width() >= min.width
            && rect.height() >= min.height
    }

    /// Create a solid shape covering `rect`.
    fn commit(&self, editor: &mut dyn Editor, rect: Rect) -> Option<ShapeId> {
        match self.props_for(rect) {
            Ok(props) => {
                let id = editor.create_object(ShapeDescriptor::new(rect, props, SOLID_OPACITY));
                log::debug!(
                    "created {} {id} at ({}, {}) {}x{}",
                    self.factory.kind(),
                    rect.x0,
                    rect.y0,
                    rect.width(),
                    rect.height()
                );
                Some(id)
            }
            Err(err) => {
                log::warn!("not creating {}: {err}", self.factory.kind());
                None
            }
        }
    }
}

fn ensure_finite(rect: Rect) -> Result<Rect, ToolError> {
    let finite = [rect.x0, rect.y0, rect.x1, rect.y1].iter().all(|v| v.is_finite());
    if finite && rect.width() >= 0.0 && rect.height() >= 0.0 {
        Ok(rect)
    } else {
        Err(ToolError::InvalidGeometry {
            width: rect.width(),
            height: rect.height(),
        })
    }
}

impl<F: ShapeFactory> Tool for DraggableShapeTool<F> {
    fn id(&self) -> &'static str {
        self.factory.kind().as_str()
    }

    fn on_enter(&mut self, editor: &mut dyn Editor) {
        editor.set_cursor(Cursor::Cross);
    }

    fn on_exit(&mut self, editor: &mut dyn Editor) {
        editor.set_cursor(Cursor::Default);
        self.discard_preview(editor);
    }

    fn on_pointer_down(&mut self, editor: &mut dyn Editor, point: Point) {
        // Only one preview may exist; a stray press restarts the gesture
        self.discard_preview(editor);

        let origin = editor.to_document_space(point);
        let rect = match ensure_finite(Rect::from_origin_size(origin, Size::new(1.0, 1.0))) {
            Ok(rect) => rect,
            Err(err) => {
                log::warn!("ignoring press for {}: {err}", self.factory.kind());
                return;
            }
        };
        let props = match self.props_for(rect) {
            Ok(props) => props,
            Err(err) => {
                log::warn!("ignoring press for {}: {err}", self.factory.kind());
                return;
            }
        };

        let preview = editor.create_object(ShapeDescriptor::new(
            rect,
            props,
            self.factory.preview_opacity(),
        ));
        log::debug!("{} drag started at {point:?}", self.factory.kind());
        self.state = GestureState::Dragging { start: point, preview };
    }

    fn on_pointer_move(&mut self, editor: &mut dyn Editor, point: Point) {
        let GestureState::Dragging { start, preview } = self.state else {
            return;
        };

        let update = self
            .drag_rect(editor, start, point)
            .and_then(|rect| Ok((rect, self.props_for(rect)?)));
        match update {
            Ok((rect, props)) => {
                let patch =
                    ShapePatch::geometry(rect, props).with_opacity(self.factory.preview_opacity());
                if !editor.update_object(preview, patch) {
                    // Preview removed behind our back; nothing left to track
                    log::debug!("{} preview {preview} vanished", self.factory.kind());
                    self.state = GestureState::Idle;
                }
            }
            Err(err) => {
                log::warn!("aborting {} drag: {err}", self.factory.kind());
                self.discard_preview(editor);
            }
        }
    }

    fn on_pointer_up(&mut self, editor: &mut dyn Editor, point: Point) {
        let GestureState::Dragging { start, .. } = self.state else {
            return;
        };
        self.discard_preview(editor);

        match self.drag_rect(editor, start, point) {
            Ok(rect) if self.meets_minimum(rect) => {
                self.commit(editor, rect);
            }
            Ok(rect) => log::debug!(
                "{} drag of {}x{} below minimum, discarded",
                self.factory.kind(),
                rect.width(),
                rect.height()
            ),
            Err(err) => log::warn!("aborting {} drag: {err}", self.factory.kind()),
        }

        editor.set_active_mode(modes::SELECT);
    }

    fn on_click(&mut self, editor: &mut dyn Editor, point: Point) {
        self.discard_preview(editor);

        let center = editor.to_document_space(point);
        match ensure_finite(Rect::from_center_size(center, self.factory.default_size())) {
            Ok(rect) => {
                self.commit(editor, rect);
            }
            Err(err) => log::warn!("ignoring click for {}: {err}", self.factory.kind()),
        }

        editor.set_active_mode(modes::SELECT);
    }

    fn on_key_down(&mut self, editor: &mut dyn Editor, key: &str) {
        if key == ESCAPE {
            self.on_cancel(editor);
        }
    }

    fn on_cancel(&mut self, editor: &mut dyn Editor) {
        if self.state != GestureState::Idle {
            log::debug!("{} drag cancelled", self.factory.kind());
        }
        self.discard_preview(editor);
        editor.set_active_mode(modes::SELECT);
    }

    fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    fn select_variant(&mut self, variant: &str) -> bool {
        self.factory.select_variant(variant)
    }
}
