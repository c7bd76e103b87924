//! Camera module: the coordinate bridge between device space and document space.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom level that corresponds to "100%" in the UI.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Camera holds the pan/zoom view transform of the canvas.
///
/// Pointer input arrives in device (viewport) space; shapes live in document
/// space. The camera converts between the two.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in device pixels.
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
            min_zoom: 0.1,
            max_zoom: 8.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Document-to-device transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Device-to-document transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a device point to document coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a document point to device coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan the camera by a delta in device coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given device point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.zoom = new_zoom;

        // Keep world_point under the cursor
        let new_screen = self.world_to_screen(world_point);
        self.offset += Vec2::new(screen_point.x - new_screen.x, screen_point.y - new_screen.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_is_identity() {
        let camera = Camera::new();
        let screen = Point::new(500.0, 500.0);
        let world = camera.screen_to_world(screen);
        assert!((world.x - 500.0).abs() < f64::EPSILON);
        assert!((world.y - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_offset_and_zoom() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(100.0, 50.0);
        camera.zoom = 2.0;
        let world = camera.screen_to_world(Point::new(300.0, 250.0));
        assert!((world.x - 100.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(30.0, -20.0);
        camera.zoom = 1.5;

        let original = Point::new(123.0, 456.0);
        let back = camera.world_to_screen(camera.screen_to_world(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed() {
        let mut camera = Camera::new();
        let anchor = Point::new(200.0, 120.0);
        let before = camera.screen_to_world(anchor);
        camera.zoom_at(anchor, 2.0);
        let after = camera.screen_to_world(anchor);
        assert!((before.x - after.x).abs() < 1e-10);
        assert!((before.y - after.y).abs() < 1e-10);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(40.0, 10.0));
        let world = camera.screen_to_world(Point::new(40.0, 10.0));
        assert!(world.x.abs() < f64::EPSILON);
        assert!(world.y.abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_at_origin_keeps_offset() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 2.0);
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.zoom - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.001);
        assert!((camera.zoom - camera.min_zoom).abs() < f64::EPSILON);

        camera.zoom_at(Point::ZERO, 1000.0);
        assert!((camera.zoom - camera.max_zoom).abs() < f64::EPSILON);
    }
}
