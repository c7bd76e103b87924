//! In-memory canvas engine implementing the [`Editor`] contract.

use crate::camera::Camera;
use crate::editor::{Cursor, Editor, modes};
use crate::shapes::{Shape, ShapeDescriptor, ShapeId, ShapePatch};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Maximum number of undo states to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// A snapshot of document state for undo/redo.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentSnapshot {
    shapes: HashMap<ShapeId, Shape>,
    z_order: Vec<ShapeId>,
}

/// A canvas document containing all shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// All shapes in the document, keyed by ID.
    pub shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    pub z_order: Vec<ShapeId>,
    /// Next z-order key handed out to a new shape.
    #[serde(default)]
    next_index: u64,
    #[serde(skip)]
    undo_stack: Vec<DocumentSnapshot>,
    #[serde(skip)]
    redo_stack: Vec<DocumentSnapshot>,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            shapes: HashMap::new(),
            z_order: Vec::new(),
            next_index: 0,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Committed state only; previews belong to a gesture, not to history.
    fn snapshot(&self) -> DocumentSnapshot {
        let shapes: HashMap<ShapeId, Shape> = self
            .shapes
            .iter()
            .filter(|(_, shape)| !shape.is_preview())
            .map(|(id, shape)| (*id, shape.clone()))
            .collect();
        let z_order = self
            .z_order
            .iter()
            .copied()
            .filter(|id| shapes.contains_key(id))
            .collect();
        DocumentSnapshot { shapes, z_order }
    }

    /// Swap in a snapshot, keeping live previews on top.
    fn restore(&mut self, snapshot: DocumentSnapshot) {
        let previews: Vec<Shape> = self.previews().cloned().collect();
        self.shapes = snapshot.shapes;
        self.z_order = snapshot.z_order;
        for preview in previews {
            let id = preview.id();
            self.z_order.push(id);
            self.shapes.insert(id, preview);
        }
    }

    /// Push current state to undo stack (call before making changes).
    pub fn push_undo(&mut self) {
        let snapshot = self.snapshot();
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();

        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if let Some(snapshot) = self.undo_stack.pop() {
            let current = self.snapshot();
            self.redo_stack.push(current);
            self.restore(snapshot);
            true
        } else {
            false
        }
    }

    /// Redo the last undone change.
    pub fn redo(&mut self) -> bool {
        if let Some(snapshot) = self.redo_stack.pop() {
            let current = self.snapshot();
            self.undo_stack.push(current);
            self.restore(snapshot);
            true
        } else {
            false
        }
    }

    /// Number of recorded undo steps.
    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Add a shape on top of the z-order.
    pub fn add_shape(&mut self, descriptor: ShapeDescriptor) -> ShapeId {
        let shape = descriptor.into_shape(self.next_index);
        self.next_index += 1;
        let id = shape.id();
        self.z_order.retain(|&shape_id| shape_id != id);
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Remove a shape from the document.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Shapes below the preview opacity threshold.
    pub fn previews(&self) -> impl Iterator<Item = &Shape> {
        self.shapes_ordered().filter(|s| s.is_preview())
    }

    /// Committed (non-preview) shapes.
    pub fn committed(&self) -> impl Iterator<Item = &Shape> {
        self.shapes_ordered().filter(|s| !s.is_preview())
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The reference host engine: a document, a camera and the active mode.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    /// Camera for the view transform.
    pub camera: Camera,
    mode: String,
    cursor: Cursor,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document, in select mode.
    pub fn new() -> Self {
        Self::with_document(CanvasDocument::new())
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: CanvasDocument) -> Self {
        Self {
            document,
            camera: Camera::new(),
            mode: modes::SELECT.to_string(),
            cursor: Cursor::Default,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }
}

impl Editor for Canvas {
    fn to_document_space(&self, point: Point) -> Point {
        self.camera.screen_to_world(point)
    }

    fn create_object(&mut self, descriptor: ShapeDescriptor) -> ShapeId {
        // Previews are transient and never become undo steps
        if !descriptor.is_preview() {
            self.document.push_undo();
        }
        log::trace!("create {} {}", descriptor.kind(), descriptor.id);
        self.document.add_shape(descriptor)
    }

    fn update_object(&mut self, id: ShapeId, patch: ShapePatch) -> bool {
        match self.document.get_shape_mut(id) {
            Some(shape) => patch.apply(shape),
            None => false,
        }
    }

    fn delete_objects(&mut self, ids: &[ShapeId]) {
        let touches_committed = ids
            .iter()
            .filter_map(|id| self.document.get_shape(*id))
            .any(|s| !s.is_preview());
        if touches_committed {
            self.document.push_undo();
        }
        for id in ids {
            self.document.remove_shape(*id);
        }
    }

    fn set_active_mode(&mut self, mode: &str) {
        if self.mode != mode {
            log::debug!("mode {} -> {}", self.mode, mode);
            self.mode = mode.to_string();
        }
    }

    fn active_mode(&self) -> &str {
        &self.mode
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }
}
