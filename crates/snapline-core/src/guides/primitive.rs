//! Display primitives handed to the overlay layer.

use kurbo::Point;
use peniko::Color;

/// Half the side length of an endpoint marker, in world pixels.
pub const MARKER_HALF_SIZE: f64 = 3.0;

/// Key identifying a primitive owned by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveKey(pub u64);

/// Which guide pool a primitive belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuideAxis {
    /// Horizontal guides (constant y), produced by y-axis alignment.
    X,
    /// Vertical guides (constant x), produced by x-axis alignment.
    Y,
}

impl GuideAxis {
    /// Class name attached to line primitives of this axis.
    pub fn class_name(self) -> &'static str {
        match self {
            GuideAxis::X => "snap-line-x",
            GuideAxis::Y => "snap-line-y",
        }
    }
}

/// RGBA8 stroke color, comparable so unchanged primitives are not re-sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Color> for Rgba {
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

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke style shared by guide lines and markers.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideStyle {
    pub color: Rgba,
    pub stroke_width: f64,
    /// Dash pattern, `None` for a solid stroke.
    pub dash_pattern: Option<Vec<f64>>,
}

/// A straight guide segment in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub from: Point,
    pub to: Point,
    pub style: GuideStyle,
    pub class_name: &'static str,
    pub visible: bool,
}

/// A small cross drawn at a guide endpoint, in world coordinates.
///
/// The marker keeps its size on screen regardless of zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPrimitive {
    pub center: Point,
    pub half_size: f64,
    pub style: GuideStyle,
    pub visible: bool,
}

impl MarkerPrimitive {
    /// The two diagonal strokes forming the cross.
    pub fn strokes(&self) -> [(Point, Point); 2] {
        let (c, h) = (self.center, self.half_size);
        [
            (Point::new(c.x - h, c.y - h), Point::new(c.x + h, c.y + h)),
            (Point::new(c.x - h, c.y + h), Point::new(c.x + h, c.y - h)),
        ]
    }
}

/// Anything the guide renderer places on the overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(LinePrimitive),
    Marker(MarkerPrimitive),
}

impl Primitive {
    pub fn is_visible(&self) -> bool {
        match self {
            Primitive::Line(line) => line.visible,
            Primitive::Marker(marker) => marker.visible,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        match self {
            Primitive::Line(line) => line.visible = visible,
            Primitive::Marker(marker) => marker.visible = visible,
        }
    }

    /// Get the line if this primitive is a line.
    pub fn as_line(&self) -> Option<&LinePrimitive> {
        match self {
            Primitive::Line(line) => Some(line),
            _ => None,
        }
    }

    /// Get the marker if this primitive is a marker.
    pub fn as_marker(&self) -> Option<&MarkerPrimitive> {
        match self {
            Primitive::Marker(marker) => Some(marker),
            _ => None,
        }
    }
}
