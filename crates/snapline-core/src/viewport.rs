//! Zoom layer model and viewport culling of snap targets.

use crate::host::SceneTree;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Pan and zoom state of the view layer that hosts the tree.
///
/// `x`/`y` is the pan offset, `width`/`height` the view size in screen
/// pixels and `scale_x`/`scale_y` the zoom factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLayer {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for ZoomLayer {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl ZoomLayer {
    /// Create a zoom layer with no pan and unit scale.
    pub fn new(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            ..Self::default()
        }
    }

    /// Horizontal scale usable as a divisor (1 when unset or degenerate).
    pub fn effective_scale(&self) -> f64 {
        if self.scale_x.is_finite() && self.scale_x > 0.0 {
            self.scale_x
        } else {
            1.0
        }
    }

    /// Transform from tree space to world space.
    pub fn transform(&self) -> Affine {
        Affine::translate(Vec2::new(self.x, self.y))
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }

    /// Convert a tree point to world coordinates.
    pub fn tree_to_world(&self, point: Point) -> Point {
        self.transform() * point
    }

    /// Convert a world point to tree coordinates.
    pub fn world_to_tree(&self, point: Point) -> Point {
        self.transform().inverse() * point
    }

    /// The visible area in tree space.
    pub fn viewport_bounds(&self) -> Rect {
        Rect::new(
            -self.x,
            -self.y,
            -self.x + self.width / self.scale_x,
            -self.y + self.height / self.scale_y,
        )
    }

    /// Pan by a delta in screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Zoom uniformly, keeping the given world point fixed.
    pub fn zoom_at(&mut self, world_point: Point, factor: f64) {
        let anchor = self.world_to_tree(world_point);
        self.scale_x *= factor;
        self.scale_y *= factor;

        // Adjust pan so the anchor stays under the cursor
        let moved = self.tree_to_world(anchor);
        self.x += world_point.x - moved.x;
        self.y += world_point.y - moved.y;
    }
}

/// Check if two boxes overlap. Touching edges count as overlapping.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !(a.x0 > b.x1 || a.y0 > b.y1 || a.x1 < b.x0 || a.y1 < b.y0)
}

/// Shapes whose box intersects the viewport, skipping structural and
/// simulated shapes.
pub fn shapes_in_viewport<T: SceneTree + ?Sized>(tree: Option<&T>, viewport: Rect) -> Vec<T::Id> {
    let Some(tree) = tree else {
        return Vec::new();
    };

    tree.shapes()
        .into_iter()
        .filter(|&id| !tree.is_structural(id) && !tree.is_simulated(id))
        .filter(|&id| {
            tree.layout_bounds(id)
                .is_some_and(|bounds| overlaps(bounds, viewport))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let layer = ZoomLayer::default();
        assert_eq!(layer.viewport_bounds(), Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_bounds_with_pan_and_zoom() {
        let layer = ZoomLayer {
            x: 50.0,
            y: -20.0,
            scale_x: 2.0,
            scale_y: 2.0,
            ..ZoomLayer::default()
        };
        let bounds = layer.viewport_bounds();
        assert!((bounds.x0 + 50.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 350.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 320.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tree_world_roundtrip() {
        let layer = ZoomLayer {
            x: 30.0,
            y: -20.0,
            scale_x: 1.5,
            scale_y: 1.5,
            ..ZoomLayer::default()
        };
        let original = Point::new(123.0, 456.0);
        let back = layer.world_to_tree(layer.tree_to_world(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_at_keeps_anchor() {
        let mut layer = ZoomLayer::default();
        let anchor = Point::new(200.0, 100.0);
        let before = layer.world_to_tree(anchor);
        layer.zoom_at(anchor, 2.0);
        let after = layer.world_to_tree(anchor);
        assert!((layer.scale_x - 2.0).abs() < f64::EPSILON);
        assert!((before.x - after.x).abs() < 1e-10);
        assert!((before.y - after.y).abs() < 1e-10);
    }

    #[test]
    fn test_effective_scale_guards_zero() {
        let layer = ZoomLayer {
            scale_x: 0.0,
            ..ZoomLayer::default()
        };
        assert!((layer.effective_scale() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overlaps() {
        let view = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(overlaps(Rect::new(50.0, 50.0, 150.0, 150.0), view));
        assert!(overlaps(Rect::new(100.0, 0.0, 120.0, 10.0), view)); // touching
        assert!(!overlaps(Rect::new(101.0, 0.0, 120.0, 10.0), view));
        assert!(!overlaps(Rect::new(-30.0, -30.0, -1.0, -1.0), view));
    }
}
