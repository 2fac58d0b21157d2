//! Snapshot of the landmarks other shapes offer as snap targets.

use crate::events::Selection;
use crate::host::SceneTree;
use crate::landmarks::{LandmarkSet, extract_landmarks};
use crate::viewport::shapes_in_viewport;
use kurbo::Rect;

/// User predicate deciding whether a shape may be snapped to.
///
/// Returning `false` excludes the shape from the candidates.
pub type ShapeFilter<T> = Box<dyn Fn(&T, <T as SceneTree>::Id) -> bool>;

/// Landmark sets of every eligible snap target.
///
/// Rebuilt from scratch whenever the selection changes and left untouched
/// while a drag is in progress, even if other shapes move meanwhile.
#[derive(Debug, Clone, Default)]
pub struct CandidateIndex {
    sets: Vec<LandmarkSet>,
}

impl CandidateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with the targets visible in `viewport`.
    pub fn rebuild<T: SceneTree + ?Sized>(
        &mut self,
        tree: Option<&T>,
        viewport: Rect,
        selection: &Selection<T::Id>,
        filter: Option<&dyn Fn(&T, T::Id) -> bool>,
    ) {
        self.sets.clear();
        let Some(tree) = tree else {
            log::debug!("No tree available, snap candidates cleared");
            return;
        };

        self.sets.extend(
            shapes_in_viewport(Some(tree), viewport)
                .into_iter()
                .filter(|&id| !selection.contains(id))
                .filter(|&id| tree.is_snappable(id))
                .filter(|&id| filter.is_none_or(|keep| keep(tree, id)))
                .filter_map(|id| extract_landmarks(tree, id)),
        );
        log::debug!("Rebuilt snap candidates: {} targets", self.sets.len());
    }

    /// Landmark sets in traversal order.
    pub fn landmarks(&self) -> &[LandmarkSet] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn clear(&mut self) {
        self.sets.clear();
    }
}
