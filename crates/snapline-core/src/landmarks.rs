//! Landmark points of shape bounding boxes.
//!
//! Every shape contributes five landmarks: the four corners of its
//! axis-aligned box in tree space and the box center.

use crate::host::SceneTree;
use kurbo::{Point, Rect};

/// The five snap anchors of an axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkSet {
    pub tl: Point,
    pub tr: Point,
    pub bl: Point,
    pub br: Point,
    pub c: Point,
}

impl LandmarkSet {
    /// Landmarks of an axis-aligned box.
    pub fn from_rect(rect: Rect) -> Self {
        let (min_x, min_y) = (rect.min_x(), rect.min_y());
        let (max_x, max_y) = (rect.max_x(), rect.max_y());
        Self {
            tl: Point::new(min_x, min_y),
            tr: Point::new(max_x, min_y),
            bl: Point::new(min_x, max_y),
            br: Point::new(max_x, max_y),
            c: Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0),
        }
    }

    /// Landmarks of the axis-aligned envelope of a point cloud.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let envelope = points.fold(Rect::from_points(first, first), |rect, p| rect.union_pt(p));
        Some(Self::from_rect(envelope))
    }

    /// The landmarks in fixed order: tl, tr, bl, br, c.
    pub fn points(&self) -> [Point; 5] {
        [self.tl, self.tr, self.bl, self.br, self.c]
    }

    /// The box these landmarks were derived from.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.tl, self.br)
    }
}

/// Landmarks of one shape, or `None` if the tree has no geometry for it.
pub fn extract_landmarks<T: SceneTree + ?Sized>(tree: &T, id: T::Id) -> Option<LandmarkSet> {
    LandmarkSet::from_points(tree.layout_points(id)?)
}

/// Landmarks of the union box of several shapes, treated as one unit.
///
/// Shapes without geometry are skipped; `None` if none of them has any.
pub fn extract_group_landmarks<T: SceneTree + ?Sized>(tree: &T, ids: &[T::Id]) -> Option<LandmarkSet> {
    LandmarkSet::from_points(
        ids.iter()
            .filter_map(|&id| tree.layout_points(id))
            .flatten(),
    )
}
