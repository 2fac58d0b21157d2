//! Capabilities the snap component needs from its host editor.
//!
//! The component never owns the scene. Each call receives the host (an
//! implementation of [`SnapApp`]) and reaches the tree, the editor and the
//! overlay through these traits.

use crate::events::{EventHub, Selection};
use crate::guides::{Primitive, PrimitiveKey};
use crate::viewport::ZoomLayer;
use kurbo::{Point, Rect, Vec2};
use std::fmt::Debug;
use std::hash::Hash;

/// The scene tree holding the shapes being edited.
///
/// All geometry is expressed in tree space, the zoom and pan independent
/// space shapes are authored in.
pub trait SceneTree {
    /// Shape identifier.
    type Id: Copy + Eq + Hash + Debug;

    /// Every shape in the tree, in traversal order.
    fn shapes(&self) -> Vec<Self::Id>;

    /// Root and container nodes that are never snap targets.
    fn is_structural(&self, id: Self::Id) -> bool;

    /// Transient shapes the editor creates while dragging a multi-selection.
    fn is_simulated(&self, id: Self::Id) -> bool;

    /// Per-shape opt-out from snapping.
    fn is_snappable(&self, _id: Self::Id) -> bool {
        true
    }

    /// Box corners in tree space, ordered top-left, top-right, bottom-left,
    /// bottom-right in the shape's own frame.
    fn layout_points(&self, id: Self::Id) -> Option<[Point; 4]>;

    /// Axis-aligned box in tree space.
    fn layout_bounds(&self, id: Self::Id) -> Option<Rect> {
        let points = self.layout_points(id)?;
        let first = Rect::from_points(points[0], points[0]);
        Some(points[1..].iter().fold(first, |rect, &p| rect.union_pt(p)))
    }

    /// Convert a tree-space point to world (display) space.
    fn world_point(&self, point: Point) -> Point;

    /// Current position of a shape.
    fn position(&self, id: Self::Id) -> Option<Point>;

    /// Move a shape to `position`.
    fn set_position(&mut self, id: Self::Id, position: Point);

    /// Move a shape by `delta`.
    fn translate(&mut self, id: Self::Id, delta: Vec2) {
        if let Some(position) = self.position(id) {
            self.set_position(id, position + delta);
        }
    }
}

/// The editor's selection state.
pub trait SelectionSource {
    type Id;

    /// Current selection.
    fn selection(&self) -> Selection<Self::Id>;

    /// Whether the editor is in multi-select mode.
    fn is_multi_select(&self) -> bool;
}

/// Overlay layer displaying guide primitives above the tree.
pub trait Overlay {
    /// Add a primitive and return its key.
    fn add(&mut self, primitive: Primitive) -> PrimitiveKey;

    /// Replace a primitive's contents.
    fn update(&mut self, key: PrimitiveKey, primitive: &Primitive);

    /// Remove a primitive for good.
    fn destroy(&mut self, key: PrimitiveKey);
}

/// Shape identifier of a host.
pub type ShapeIdOf<A> = <<A as SnapApp>::Tree as SceneTree>::Id;

/// The application handle the snap component is attached to.
pub trait SnapApp {
    type Tree: SceneTree;
    type Editor: SelectionSource<Id = <Self::Tree as SceneTree>::Id>;
    type Sky: Overlay;

    fn tree(&self) -> Option<&Self::Tree>;

    fn tree_mut(&mut self) -> Option<&mut Self::Tree>;

    fn editor(&self) -> Option<&Self::Editor>;

    fn sky(&self) -> Option<&Self::Sky>;

    fn sky_mut(&mut self) -> Option<&mut Self::Sky>;

    /// Borrow the tree for reading while drawing into the sky.
    fn tree_and_sky(&mut self) -> Option<(&Self::Tree, &mut Self::Sky)>;

    /// Current pan and zoom of the view.
    fn zoom_layer(&self) -> ZoomLayer;

    fn events_mut(&mut self) -> &mut dyn EventHub;

    /// Mutate the tree without triggering the editor's own layout
    /// bookkeeping for the drag proxy.
    fn safe_change<F: FnOnce(&mut Self::Tree)>(&mut self, change: F);
}
