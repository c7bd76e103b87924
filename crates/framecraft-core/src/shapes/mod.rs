//! Shape definitions for the canvas.

mod dynamic_background;
mod web_container;

pub use dynamic_background::{
    BackgroundType, BackgroundVariant, DynamicBackgroundProps, GrainGradientStyle, GrainShape,
    HeatmapStyle, StyleError,
};
pub use web_container::{DEFAULT_WEB_CONTAINER_URL, WebContainerProps};

use kurbo::{Point, Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Parent container of shapes created on the page itself.
pub const PAGE_ID: &str = "page:page";

/// Shapes below this opacity are in-progress previews, not committed objects.
pub const PREVIEW_OPACITY_THRESHOLD: f64 = 0.8;

/// Opacity of committed shapes.
pub const SOLID_OPACITY: f64 = 1.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#rrggbb` or `#rrggbbaa` hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Format as a lowercase `#rrggbb` string (alpha is dropped when opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Discriminant of the shape property schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    WebContainer,
    DynamicBackground,
}

impl ShapeKind {
    /// Identifier used by the host engine and the tool registry.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::WebContainer => "web-container",
            ShapeKind::DynamicBackground => "dynamic-background",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ShapeProps {
    WebContainer(WebContainerProps),
    DynamicBackground(DynamicBackgroundProps),
}

impl ShapeProps {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeProps::WebContainer(_) => ShapeKind::WebContainer,
            ShapeProps::DynamicBackground(_) => ShapeKind::DynamicBackground,
        }
    }

    /// Size recorded in the property bag.
    pub fn size(&self) -> Size {
        match self {
            ShapeProps::WebContainer(p) => Size::new(p.w, p.h),
            ShapeProps::DynamicBackground(p) => Size::new(p.w, p.h),
        }
    }

    /// Whether the recorded size is finite and non-negative.
    pub fn has_valid_size(&self) -> bool {
        let size = self.size();
        size.width.is_finite() && size.height.is_finite() && size.width >= 0.0 && size.height >= 0.0
    }

    pub fn as_web_container(&self) -> Option<&WebContainerProps> {
        match self {
            ShapeProps::WebContainer(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_dynamic_background(&self) -> Option<&DynamicBackgroundProps> {
        match self {
            ShapeProps::DynamicBackground(p) => Some(p),
            _ => None,
        }
    }
}

/// A canvas object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    /// Top-left corner in page space.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub props: ShapeProps,
    /// 0.0 = fully transparent, 1.0 = fully opaque.
    pub opacity: f64,
    /// Z-order key, assigned by the engine (higher is in front).
    pub index: u64,
    #[serde(default)]
    pub is_locked: bool,
    pub parent: String,
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.props.kind()
    }

    /// Bounding box in page space.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, Size::new(self.width, self.height))
    }

    /// Check if this shape is an in-progress preview.
    pub fn is_preview(&self) -> bool {
        self.opacity < PREVIEW_OPACITY_THRESHOLD
    }
}

/// Everything the engine needs to create a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub id: ShapeId,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub props: ShapeProps,
    pub opacity: f64,
    pub is_locked: bool,
    pub parent: String,
}

impl ShapeDescriptor {
    /// Describe an unlocked page-level shape with a fresh id.
    pub fn new(rect: Rect, props: ShapeProps, opacity: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position: rect.origin(),
            width: rect.width(),
            height: rect.height(),
            props,
            opacity,
            is_locked: false,
            parent: PAGE_ID.to_string(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.props.kind()
    }

    pub fn is_preview(&self) -> bool {
        self.opacity < PREVIEW_OPACITY_THRESHOLD
    }

    /// Build the shape record with the engine-assigned z-order key.
    pub fn into_shape(self, index: u64) -> Shape {
        Shape {
            id: self.id,
            position: self.position,
            width: self.width,
            height: self.height,
            props: self.props,
            opacity: self.opacity.clamp(0.0, 1.0),
            index,
            is_locked: self.is_locked,
            parent: self.parent,
        }
    }
}

/// Partial update of a shape. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapePatch {
    pub position: Option<Point>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub props: Option<ShapeProps>,
    pub opacity: Option<f64>,
}

impl ShapePatch {
    /// Patch that moves and resizes a shape and replaces its props.
    pub fn geometry(rect: Rect, props: ShapeProps) -> Self {
        Self {
            position: Some(rect.origin()),
            width: Some(rect.width()),
            height: Some(rect.height()),
            props: Some(props),
            opacity: None,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Apply to a shape. The kind of a shape never changes; a patch carrying
    /// props of another kind is rejected.
    pub fn apply(self, shape: &mut Shape) -> bool {
        if self.props.as_ref().is_some_and(|p| p.kind() != shape.kind()) {
            return false;
        }
        if let Some(position) = self.position {
            shape.position = position;
        }
        if let Some(width) = self.width {
            shape.width = width;
        }
        if let Some(height) = self.height {
            shape.height = height;
        }
        if let Some(props) = self.props {
            shape.props = props;
        }
        if let Some(opacity) = self.opacity {
            shape.opacity = opacity.clamp(0.0, 1.0);
        }
        true
    }
}
