//! Nodes stored in the reference scene.

use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for nodes.
pub type NodeId = Uuid;

/// What a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// The page frame holding every element. Never a snap target.
    Root,
    /// A rectangular element.
    Rect,
}

/// A box in the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub(crate) id: NodeId,
    pub kind: NodeKind,
    /// Top-left corner position (before rotation).
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Rotation angle in radians (around center).
    #[serde(default)]
    pub rotation: f64,
    /// Whether other shapes may snap to this one.
    #[serde(default = "default_snappable")]
    pub snappable: bool,
    /// Set on the transient proxy created for multi-selection drags.
    #[serde(skip)]
    pub simulated: bool,
}

fn default_snappable() -> bool {
    true
}

impl Node {
    fn new(kind: NodeKind, position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            width,
            height,
            rotation: 0.0,
            snappable: true,
            simulated: false,
        }
    }

    /// Create a rectangle element.
    pub fn rect(position: Point, width: f64, height: f64) -> Self {
        Self::new(NodeKind::Rect, position, width, height)
    }

    /// Create a page frame at the origin.
    pub fn root(width: f64, height: f64) -> Self {
        Self::new(NodeKind::Root, Point::ZERO, width, height)
    }

    /// Create a drag proxy covering `bounds`.
    pub fn proxy(bounds: Rect) -> Self {
        let mut node = Self::rect(bounds.origin(), bounds.width(), bounds.height());
        node.simulated = true;
        node
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the node as an unrotated kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Box corners in the node's own frame (top-left, top-right,
    /// bottom-left, bottom-right), rotated about the center.
    pub fn corners(&self) -> [Point; 4] {
        let rect = self.as_rect();
        let corners = [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x1, rect.y1),
        ];
        if self.rotation == 0.0 {
            return corners;
        }
        let rotate = Affine::rotate_about(self.rotation, rect.center());
        corners.map(|p| rotate * p)
    }
}
