//! Per-axis alignment matching between a moving shape and its candidates.

use crate::landmarks::LandmarkSet;
use kurbo::{Point, Vec2};

/// One axis-scoped observation: `target_point` (on the moving shape) and
/// `snap_point` (on a candidate) differ by `offset` along that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentCandidate {
    pub offset: f64,
    pub target_point: Point,
    pub snap_point: Point,
}

/// Outcome of matching a moving shape against the candidate set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapMatch {
    /// Chosen x offset, `None` when nothing aligned on x.
    pub offset_x: Option<f64>,
    /// Chosen y offset, `None` when nothing aligned on y.
    pub offset_y: Option<f64>,
    /// X alignments sharing the chosen x offset.
    pub supporting_x: Vec<AlignmentCandidate>,
    /// Y alignments sharing the chosen y offset.
    pub supporting_y: Vec<AlignmentCandidate>,
}

impl SnapMatch {
    /// Check if either axis snapped.
    pub fn is_snapped(&self) -> bool {
        self.offset_x.is_some() || self.offset_y.is_some()
    }

    /// Translation to apply to the moving shape.
    pub fn delta(&self) -> Vec2 {
        Vec2::new(-self.offset_x.unwrap_or(0.0), -self.offset_y.unwrap_or(0.0))
    }

    /// Segments for vertical guides, one per x-axis supporting pair, running
    /// from the candidate landmark to the snapped moving landmark.
    pub fn vertical_lines(&self) -> Vec<(Point, Point)> {
        let offset_y = self.offset_y.unwrap_or(0.0);
        self.supporting_x
            .iter()
            .map(|item| {
                (
                    item.snap_point,
                    Point::new(item.snap_point.x, item.target_point.y - offset_y),
                )
            })
            .collect()
    }

    /// Segments for horizontal guides, one per y-axis supporting pair.
    pub fn horizontal_lines(&self) -> Vec<(Point, Point)> {
        let offset_x = self.offset_x.unwrap_or(0.0);
        self.supporting_y
            .iter()
            .map(|item| {
                (
                    item.snap_point,
                    Point::new(item.target_point.x - offset_x, item.snap_point.y),
                )
            })
            .collect()
    }
}

/// Round half up, so `-2.5` becomes `-2` and `2.5` becomes `3`.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Check if two coordinates are within `tolerance` once rounded to whole units.
pub fn is_in_range(a: f64, b: f64, tolerance: f64) -> bool {
    (round_half_up(a) - round_half_up(b)).abs() <= tolerance
}

/// Check if two offsets agree to two decimal places.
fn same_offset(a: f64, b: f64) -> bool {
    (a * 100.0).round() == (b * 100.0).round()
}

/// Pick the smallest-magnitude alignment; ties go to the first one found.
fn best(candidates: &[AlignmentCandidate]) -> Option<f64> {
    candidates
        .iter()
        .min_by(|a, b| a.offset.abs().total_cmp(&b.offset.abs()))
        .map(|item| item.offset)
}

fn supporting(candidates: Vec<AlignmentCandidate>, chosen: Option<f64>) -> Vec<AlignmentCandidate> {
    let Some(chosen) = chosen else {
        return Vec::new();
    };
    candidates
        .into_iter()
        .filter(|item| same_offset(item.offset, chosen))
        .collect()
}

/// Match the landmarks of a moving shape against every candidate.
///
/// X and Y are decided independently: a shape may snap on one axis, both,
/// or neither. `tolerance` is in tree units.
pub fn match_landmarks(moving: &LandmarkSet, candidates: &[LandmarkSet], tolerance: f64) -> SnapMatch {
    let mut snap_x = Vec::new();
    let mut snap_y = Vec::new();

    for target_point in moving.points() {
        for snap_point in candidates.iter().flat_map(LandmarkSet::points) {
            if is_in_range(target_point.x, snap_point.x, tolerance) {
                snap_x.push(AlignmentCandidate {
                    offset: target_point.x - snap_point.x,
                    target_point,
                    snap_point,
                });
            }
            if is_in_range(target_point.y, snap_point.y, tolerance) {
                snap_y.push(AlignmentCandidate {
                    offset: target_point.y - snap_point.y,
                    target_point,
                    snap_point,
                });
            }
        }
    }

    let offset_x = best(&snap_x);
    let offset_y = best(&snap_y);

    SnapMatch {
        offset_x,
        offset_y,
        supporting_x: supporting(snap_x, offset_x),
        supporting_y: supporting(snap_y, offset_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    fn boxed(x: f64, y: f64, w: f64, h: f64) -> LandmarkSet {
        LandmarkSet::from_rect(Rect::new(x, y, x + w, y + h))
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.49), 2.0);
    }

    #[test]
    fn test_in_range_uses_rounded_values() {
        assert!(is_in_range(100.4, 105.0, 5.0));
        assert!(!is_in_range(99.4, 105.0, 5.0));
        // 0.6 and 1.4 both round to 1
        assert!(is_in_range(0.6, 1.4, 0.0));
    }

    #[test]
    fn test_scenario_offset_three() {
        // Moving shape at x=103, candidate at x=100, far apart vertically
        let moving = boxed(103.0, 500.0, 50.0, 50.0);
        let candidates = [boxed(100.0, 0.0, 50.0, 50.0)];
        let result = match_landmarks(&moving, &candidates, 5.0);

        assert_eq!(result.offset_x, Some(3.0));
        assert_eq!(result.offset_y, None);
        assert!((result.delta().x + 3.0).abs() < f64::EPSILON);
        assert_eq!(result.delta().y, 0.0);
    }

    #[test]
    fn test_minimal_offset_wins() {
        // Left edge is 4 away from one candidate, right edge 2 away from another
        let moving = boxed(104.0, 500.0, 100.0, 50.0);
        let candidates = [boxed(100.0, 0.0, 50.0, 10.0), boxed(202.0, 0.0, 10.0, 10.0)];
        let result = match_landmarks(&moving, &candidates, 5.0);
        assert_eq!(result.offset_x, Some(2.0));
        assert!(result.supporting_x.iter().all(|item| item.offset == 2.0));
    }

    #[test]
    fn test_tie_keeps_first_found() {
        let moving = boxed(100.0, 500.0, 100.0, 10.0);
        // -3 is found before +3 because that candidate comes first
        let candidates = [boxed(103.0, 0.0, 20.0, 20.0), boxed(57.0, 0.0, 40.0, 20.0)];
        let result = match_landmarks(&moving, &candidates, 5.0);
        assert_eq!(result.offset_x, Some(-3.0));
        assert!(result.supporting_x.iter().all(|item| item.offset == -3.0));
    }

    #[test]
    fn test_axes_are_independent() {
        // Only x lines up
        let moving = boxed(102.0, 300.0, 50.0, 50.0);
        let candidates = [boxed(100.0, 0.0, 50.0, 50.0)];
        let result = match_landmarks(&moving, &candidates, 5.0);
        assert_eq!(result.offset_x, Some(2.0));
        assert_eq!(result.offset_y, None);
        assert!(result.supporting_y.is_empty());

        // Only y lines up
        let moving = boxed(400.0, 3.0, 50.0, 50.0);
        let result = match_landmarks(&moving, &candidates, 5.0);
        assert_eq!(result.offset_x, None);
        assert_eq!(result.offset_y, Some(3.0));
    }

    #[test]
    fn test_idempotent_after_snap() {
        let mut moving = boxed(103.0, 4.0, 50.0, 50.0);
        let candidates = [boxed(100.0, 0.0, 50.0, 50.0)];
        let first = match_landmarks(&moving, &candidates, 5.0);
        let delta = first.delta();
        moving = LandmarkSet::from_rect(moving.bounds() + delta);

        let second = match_landmarks(&moving, &candidates, 5.0);
        assert_eq!(second.offset_x, Some(0.0));
        assert_eq!(second.offset_y, Some(0.0));
        assert_eq!(second.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_no_candidates() {
        let moving = boxed(0.0, 0.0, 10.0, 10.0);
        let result = match_landmarks(&moving, &[], 5.0);
        assert!(!result.is_snapped());
        assert!(result.supporting_x.is_empty());
        assert!(result.supporting_y.is_empty());
    }

    #[test]
    fn test_zero_tolerance_keeps_exact_matches() {
        let moving = boxed(100.0, 500.0, 50.0, 50.0);
        let candidates = [boxed(100.0, 0.0, 50.0, 50.0), boxed(301.0, 0.0, 10.0, 10.0)];
        let result = match_landmarks(&moving, &candidates, 0.0);
        assert_eq!(result.offset_x, Some(0.0));

        let shifted = boxed(101.0, 500.0, 30.0, 50.0);
        let result = match_landmarks(&shifted, &candidates[..1], 0.0);
        assert_eq!(result.offset_x, None);
    }

    #[test]
    fn test_supporting_pairs_share_offset() {
        // Same width boxes stacked: tl, tr, bl, br and c all align on x
        let moving = boxed(101.0, 200.0, 50.0, 50.0);
        let candidates = [boxed(100.0, 0.0, 50.0, 50.0)];
        let result = match_landmarks(&moving, &candidates, 5.0);
        assert_eq!(result.offset_x, Some(1.0));
        // tl/bl against tl/bl, tr/br against tr/br, c against c
        assert_eq!(result.supporting_x.len(), 9);
    }

    #[test]
    fn test_supporting_two_decimal_precision() {
        let moving = boxed(100.001, 500.0, 10.0, 10.0);
        let candidates = [boxed(100.0, 0.0, 10.0, 10.0), boxed(99.998, 100.0, 10.0, 10.0)];
        let result = match_landmarks(&moving, &candidates, 5.0);
        // offsets 0.001 and 0.003 agree at two decimals
        let offsets: Vec<f64> = result.supporting_x.iter().map(|item| item.offset).collect();
        assert!(offsets.iter().any(|o| (o - 0.003).abs() < 1e-9));
        assert!(offsets.iter().any(|o| (o - 0.001).abs() < 1e-9));
    }

    #[test]
    fn test_guide_segments() {
        let moving = boxed(103.0, 204.0, 50.0, 50.0);
        let candidates = [boxed(100.0, 0.0, 50.0, 50.0), boxed(400.0, 200.0, 20.0, 20.0)];
        let result = match_landmarks(&moving, &candidates, 5.0);
        assert_eq!(result.offset_x, Some(3.0));
        assert_eq!(result.offset_y, Some(4.0));

        // Vertical lines end at the snapped y of the moving landmark
        for (from, to) in result.vertical_lines() {
            assert_eq!(from.x, to.x);
            assert!(to.y >= 200.0);
        }
        // Horizontal lines end at the snapped x of the moving landmark
        for (from, to) in result.horizontal_lines() {
            assert_eq!(from.y, to.y);
            assert!(to.x >= 100.0 && to.x <= 150.0);
        }
    }
}
