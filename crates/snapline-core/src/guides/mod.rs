//! Guide rendering: alignment lines and endpoint markers on the overlay.

mod pool;
mod primitive;

pub use pool::PrimitivePool;
pub use primitive::{
    GuideAxis, GuideStyle, LinePrimitive, MARKER_HALF_SIZE, MarkerPrimitive, Primitive,
    PrimitiveKey, Rgba,
};

use crate::host::{Overlay, SceneTree};
use crate::matcher::SnapMatch;
use kurbo::Point;

/// A guide segment in tree space.
pub type Segment = (Point, Point);

/// Merge collinear segments.
///
/// Segments of one axis are grouped by their constant coordinate (y for
/// [`GuideAxis::X`], x for [`GuideAxis::Y`]) in first-appearance order, and
/// each group becomes one segment spanning the group's extent.
pub fn coalesce(lines: &[Segment], axis: GuideAxis) -> Vec<Segment> {
    // (constant, min, max)
    let mut groups: Vec<(f64, f64, f64)> = Vec::new();
    for &(a, b) in lines {
        let (constant, lo, hi) = match axis {
            GuideAxis::X => (a.y, a.x.min(b.x), a.x.max(b.x)),
            GuideAxis::Y => (a.x, a.y.min(b.y), a.y.max(b.y)),
        };
        match groups.iter_mut().find(|group| group.0 == constant) {
            Some(group) => {
                group.1 = group.1.min(lo);
                group.2 = group.2.max(hi);
            }
            None => groups.push((constant, lo, hi)),
        }
    }

    groups
        .into_iter()
        .map(|(constant, lo, hi)| match axis {
            GuideAxis::X => (Point::new(lo, constant), Point::new(hi, constant)),
            GuideAxis::Y => (Point::new(constant, lo), Point::new(constant, hi)),
        })
        .collect()
}

/// Endpoints of the raw segments, each location once, in encounter order.
fn endpoints(lines: &[Segment]) -> Vec<Point> {
    let mut points: Vec<Point> = Vec::with_capacity(lines.len() * 2);
    for &(a, b) in lines {
        for p in [a, b] {
            if !points.contains(&p) {
                points.push(p);
            }
        }
    }
    points
}

/// Draws guides through pooled overlay primitives.
///
/// One line pool and one marker pool per axis. Pools grow to the largest
/// number of simultaneous guides seen and are only emptied by
/// [`GuideRenderer::destroy`].
#[derive(Debug, Clone, Default)]
pub struct GuideRenderer {
    lines_x: PrimitivePool,
    lines_y: PrimitivePool,
    markers_x: PrimitivePool,
    markers_y: PrimitivePool,
}

impl GuideRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lines(&mut self, axis: GuideAxis) -> &mut PrimitivePool {
        match axis {
            GuideAxis::X => &mut self.lines_x,
            GuideAxis::Y => &mut self.lines_y,
        }
    }

    fn markers(&mut self, axis: GuideAxis) -> &mut PrimitivePool {
        match axis {
            GuideAxis::X => &mut self.markers_x,
            GuideAxis::Y => &mut self.markers_y,
        }
    }

    fn pools(&self) -> [&PrimitivePool; 4] {
        [&self.lines_x, &self.lines_y, &self.markers_x, &self.markers_y]
    }

    /// Pooled line primitives for an axis.
    pub fn line_pool(&self, axis: GuideAxis) -> &PrimitivePool {
        match axis {
            GuideAxis::X => &self.lines_x,
            GuideAxis::Y => &self.lines_y,
        }
    }

    /// Pooled marker primitives for an axis.
    pub fn marker_pool(&self, axis: GuideAxis) -> &PrimitivePool {
        match axis {
            GuideAxis::X => &self.markers_x,
            GuideAxis::Y => &self.markers_y,
        }
    }

    /// Total pooled primitives.
    pub fn pooled(&self) -> usize {
        self.pools().iter().map(|pool| pool.len()).sum()
    }

    /// Primitives currently shown.
    pub fn visible(&self) -> usize {
        self.pools().iter().map(|pool| pool.visible_count()).sum()
    }

    /// Show the guides for `snap`, hiding whatever the previous frame showed
    /// beyond that. Returns the number of primitives newly created.
    pub fn render<T, O>(
        &mut self,
        overlay: &mut O,
        tree: &T,
        snap: &SnapMatch,
        style: &GuideStyle,
        show_points: bool,
    ) -> usize
    where
        T: SceneTree + ?Sized,
        O: Overlay + ?Sized,
    {
        let vertical = snap.vertical_lines();
        let horizontal = snap.horizontal_lines();
        self.draw_axis(overlay, tree, GuideAxis::Y, &vertical, style, show_points)
            + self.draw_axis(overlay, tree, GuideAxis::X, &horizontal, style, show_points)
    }

    fn draw_axis<T, O>(
        &mut self,
        overlay: &mut O,
        tree: &T,
        axis: GuideAxis,
        raw: &[Segment],
        style: &GuideStyle,
        show_points: bool,
    ) -> usize
    where
        T: SceneTree + ?Sized,
        O: Overlay + ?Sized,
    {
        let segments = coalesce(raw, axis);
        let line = |from: Point, to: Point, visible: bool| {
            Primitive::Line(LinePrimitive {
                from,
                to,
                style: style.clone(),
                class_name: axis.class_name(),
                visible,
            })
        };

        let pool = self.lines(axis);
        let mut created = pool.ensure(overlay, segments.len(), || line(Point::ZERO, Point::ZERO, false));
        for (index, &(from, to)) in segments.iter().enumerate() {
            pool.set(overlay, index, line(tree.world_point(from), tree.world_point(to), true));
        }
        pool.hide_from(overlay, segments.len());

        let pool = self.markers(axis);
        if !show_points {
            pool.hide_all(overlay);
            return created;
        }

        let points = endpoints(raw);
        let marker = |center: Point, visible: bool| {
            Primitive::Marker(MarkerPrimitive {
                center,
                half_size: MARKER_HALF_SIZE,
                style: GuideStyle {
                    dash_pattern: None,
                    ..style.clone()
                },
                visible,
            })
        };
        created += pool.ensure(overlay, points.len(), || marker(Point::ZERO, false));
        for (index, &point) in points.iter().enumerate() {
            pool.set(overlay, index, marker(tree.world_point(point), true));
        }
        pool.hide_from(overlay, points.len());

        log::trace!(
            "Drew {} {:?} guides and {} markers",
            segments.len(),
            axis,
            points.len()
        );
        created
    }

    /// Hide every guide. Pooled primitives stay on the overlay.
    pub fn clear<O: Overlay + ?Sized>(&mut self, overlay: &mut O) {
        for axis in [GuideAxis::X, GuideAxis::Y] {
            self.lines(axis).hide_all(overlay);
            self.markers(axis).hide_all(overlay);
        }
    }

    /// Remove every pooled primitive from the overlay.
    pub fn destroy<O: Overlay + ?Sized>(&mut self, overlay: &mut O) {
        for axis in [GuideAxis::X, GuideAxis::Y] {
            self.lines(axis).destroy_all(overlay);
            self.markers(axis).destroy_all(overlay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Scene, Sky};
    use crate::matcher::AlignmentCandidate;
    use crate::viewport::ZoomLayer;
    use kurbo::Vec2;

    fn style() -> GuideStyle {
        GuideStyle {
            color: Rgba {
                r: 127,
                g: 110,
                b: 246,
                a: 255,
            },
            stroke_width: 1.0,
            dash_pattern: Some(vec![5.0]),
        }
    }

    fn pair(offset: f64, target: (f64, f64), snap: (f64, f64)) -> AlignmentCandidate {
        AlignmentCandidate {
            offset,
            target_point: Point::new(target.0, target.1),
            snap_point: Point::new(snap.0, snap.1),
        }
    }

    /// A match with `n` x-axis alignments on distinct vertical lines.
    fn x_match(n: usize) -> SnapMatch {
        SnapMatch {
            offset_x: Some(0.0),
            supporting_x: (0..n)
                .map(|i| pair(0.0, (i as f64 * 50.0, 300.0), (i as f64 * 50.0, 0.0)))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_coalesce_three_parallel_into_one() {
        let lines = [
            (Point::new(100.0, 0.0), Point::new(100.0, 50.0)),
            (Point::new(100.0, 200.0), Point::new(100.0, 120.0)),
            (Point::new(100.0, 30.0), Point::new(100.0, 90.0)),
        ];
        let merged = coalesce(&lines, GuideAxis::Y);
        assert_eq!(merged, vec![(Point::new(100.0, 0.0), Point::new(100.0, 200.0))]);
    }

    #[test]
    fn test_coalesce_keeps_distinct_constants() {
        let lines = [
            (Point::new(0.0, 10.0), Point::new(40.0, 10.0)),
            (Point::new(5.0, 20.0), Point::new(60.0, 20.0)),
            (Point::new(-10.0, 10.0), Point::new(20.0, 10.0)),
        ];
        let merged = coalesce(&lines, GuideAxis::X);
        assert_eq!(
            merged,
            vec![
                (Point::new(-10.0, 10.0), Point::new(40.0, 10.0)),
                (Point::new(5.0, 20.0), Point::new(60.0, 20.0)),
            ]
        );
    }

    #[test]
    fn test_endpoints_dedup() {
        let lines = [
            (Point::new(0.0, 0.0), Point::new(0.0, 10.0)),
            (Point::new(0.0, 0.0), Point::new(0.0, 20.0)),
        ];
        assert_eq!(endpoints(&lines).len(), 3);
    }

    #[test]
    fn test_render_three_alignments_one_line() {
        let mut sky = Sky::new();
        let scene = Scene::new();
        let mut renderer = GuideRenderer::new();
        let snap = SnapMatch {
            offset_x: Some(2.0),
            supporting_x: vec![
                pair(2.0, (102.0, 300.0), (100.0, 0.0)),
                pair(2.0, (102.0, 350.0), (100.0, 50.0)),
                pair(2.0, (102.0, 325.0), (100.0, 25.0)),
            ],
            ..Default::default()
        };

        renderer.render(&mut sky, &scene, &snap, &style(), false);
        assert_eq!(renderer.line_pool(GuideAxis::Y).visible_count(), 1);
        assert_eq!(renderer.line_pool(GuideAxis::X).visible_count(), 0);

        let line = sky.visible_lines().next().unwrap().clone();
        assert_eq!(line.from, Point::new(100.0, 0.0));
        assert_eq!(line.to, Point::new(100.0, 350.0));
        assert_eq!(line.class_name, "snap-line-y");
    }

    #[test]
    fn test_render_reuses_pool() {
        let mut sky = Sky::new();
        let scene = Scene::new();
        let mut renderer = GuideRenderer::new();

        assert_eq!(renderer.render(&mut sky, &scene, &x_match(3), &style(), false), 3);
        assert_eq!(renderer.render(&mut sky, &scene, &x_match(3), &style(), false), 0);
        assert_eq!(renderer.render(&mut sky, &scene, &x_match(5), &style(), false), 2);
        assert_eq!(sky.added(), 5);

        // Fewer guides hide the surplus instead of removing it
        assert_eq!(renderer.render(&mut sky, &scene, &x_match(1), &style(), false), 0);
        assert_eq!(renderer.visible(), 1);
        assert_eq!(renderer.pooled(), 5);
        assert_eq!(sky.len(), 5);
    }

    #[test]
    fn test_render_empty_hides_all() {
        let mut sky = Sky::new();
        let scene = Scene::new();
        let mut renderer = GuideRenderer::new();
        renderer.render(&mut sky, &scene, &x_match(2), &style(), true);
        assert!(renderer.visible() > 0);

        renderer.render(&mut sky, &scene, &SnapMatch::default(), &style(), true);
        assert_eq!(renderer.visible(), 0);
        assert_eq!(sky.visible_count(), 0);
    }

    #[test]
    fn test_render_markers() {
        let mut sky = Sky::new();
        let scene = Scene::new();
        let mut renderer = GuideRenderer::new();
        renderer.render(&mut sky, &scene, &x_match(2), &style(), true);

        // two raw segments, four distinct endpoints
        assert_eq!(renderer.marker_pool(GuideAxis::Y).visible_count(), 4);
        let marker = sky.visible_markers().next().unwrap();
        assert_eq!(marker.half_size, MARKER_HALF_SIZE);
        assert!(marker.style.dash_pattern.is_none());

        // Turning markers off hides them
        renderer.render(&mut sky, &scene, &x_match(2), &style(), false);
        assert_eq!(renderer.marker_pool(GuideAxis::Y).visible_count(), 0);
    }

    #[test]
    fn test_render_converts_to_world() {
        let mut sky = Sky::new();
        let mut scene = Scene::new();
        scene.zoom = ZoomLayer {
            scale_x: 2.0,
            scale_y: 2.0,
            ..ZoomLayer::default()
        };
        scene.zoom.pan(Vec2::new(10.0, 20.0));
        let mut renderer = GuideRenderer::new();
        renderer.render(&mut sky, &scene, &x_match(1), &style(), false);

        let line = sky.visible_lines().next().unwrap();
        assert_eq!(line.from, Point::new(10.0, 20.0));
        assert_eq!(line.to, Point::new(10.0, 620.0));
    }

    #[test]
    fn test_clear_and_destroy() {
        let mut sky = Sky::new();
        let scene = Scene::new();
        let mut renderer = GuideRenderer::new();
        renderer.render(&mut sky, &scene, &x_match(2), &style(), true);

        renderer.clear(&mut sky);
        assert_eq!(sky.visible_count(), 0);
        assert_eq!(sky.len(), renderer.pooled());

        renderer.destroy(&mut sky);
        assert_eq!(renderer.pooled(), 0);
        assert_eq!(sky.len(), 0);
    }
}
