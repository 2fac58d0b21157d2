//! The snap component: reacts to editor events, snaps dragged shapes and
//! maintains the guide overlay.

use crate::candidates::{CandidateIndex, ShapeFilter};
use crate::config::{
    DEFAULT_DASH_PATTERN, DEFAULT_SNAP_SIZE, DEFAULT_STROKE_WIDTH, SnapConfig,
};
use crate::error::{SnapError, SnapResult};
use crate::events::{EventKind, Selection, SnapEvent, Subscriptions};
use crate::guides::{GuideRenderer, GuideStyle};
use crate::host::{SceneTree, SelectionSource, ShapeIdOf, SnapApp};
use crate::landmarks::{LandmarkSet, extract_group_landmarks, extract_landmarks};
use crate::matcher::{SnapMatch, match_landmarks};
use kurbo::Vec2;
use peniko::Color;
use std::fmt;

/// Alignment snapping attached to a host editor.
///
/// The public fields may be changed at any time; new values apply from the
/// next move.
pub struct Snap<A: SnapApp> {
    /// Snapping distance in screen pixels.
    pub snap_size: f64,
    pub line_color: Color,
    /// Whether guides are drawn.
    pub show_line: bool,
    pub stroke_width: f64,
    /// Whether guides are dashed with `dash_pattern`.
    pub is_dash: bool,
    pub dash_pattern: Vec<f64>,
    /// Whether markers are drawn at guide endpoints.
    pub show_line_points: bool,
    filter: Option<ShapeFilter<A::Tree>>,
    candidates: CandidateIndex,
    renderer: GuideRenderer,
    subscriptions: Option<Subscriptions>,
}

impl<A: SnapApp> fmt::Debug for Snap<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snap")
            .field("snap_size", &self.snap_size)
            .field("show_line", &self.show_line)
            .field("has_filter", &self.filter.is_some())
            .field("candidates", &self.candidates.len())
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}

impl<A: SnapApp> Snap<A> {
    /// Create a snap component for `app`. It starts disabled.
    ///
    /// Fails when the host lacks a tree, an editor or a sky layer, or when
    /// the configured line color cannot be parsed.
    pub fn new(app: &A, config: SnapConfig) -> SnapResult<Self> {
        if app.tree().is_none() {
            return Err(SnapError::MissingTree);
        }
        if app.editor().is_none() {
            return Err(SnapError::MissingEditor);
        }
        if app.sky().is_none() {
            return Err(SnapError::MissingSky);
        }
        let line_color = config.resolve_line_color()?;

        Ok(Self {
            snap_size: config.snap_size.unwrap_or(DEFAULT_SNAP_SIZE),
            line_color,
            show_line: config.show_line.unwrap_or(true),
            stroke_width: config.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH),
            is_dash: config.is_dash.unwrap_or(true),
            dash_pattern: config
                .dash_pattern
                .unwrap_or_else(|| DEFAULT_DASH_PATTERN.to_vec()),
            show_line_points: config.show_line_points.unwrap_or(false),
            filter: None,
            candidates: CandidateIndex::new(),
            renderer: GuideRenderer::new(),
            subscriptions: None,
        })
    }

    /// Set the candidate filter at construction time.
    pub fn with_filter(mut self, filter: ShapeFilter<A::Tree>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Replace the candidate filter. Applies from the next selection change.
    pub fn change_filter(&mut self, filter: Option<ShapeFilter<A::Tree>>) {
        self.filter = filter;
    }

    /// Check if the component is listening to editor events.
    pub fn is_enabled(&self) -> bool {
        self.subscriptions.is_some()
    }

    /// Number of shapes currently offered as snap targets.
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Landmarks of the current snap targets.
    pub fn candidates(&self) -> &[LandmarkSet] {
        self.candidates.landmarks()
    }

    pub fn guides(&self) -> &GuideRenderer {
        &self.renderer
    }

    /// Snapping distance in tree units at the host's current zoom.
    pub fn tolerance(&self, app: &A) -> f64 {
        self.snap_size / app.zoom_layer().effective_scale()
    }

    fn style(&self) -> GuideStyle {
        GuideStyle {
            color: self.line_color.into(),
            stroke_width: self.stroke_width,
            dash_pattern: self.is_dash.then(|| self.dash_pattern.clone()),
        }
    }

    /// Start or stop listening to editor events.
    ///
    /// Enabling subscribes to selection, move, pointer-up and post-layout
    /// events and, if something is already selected, builds the candidates
    /// right away. Disabling leaves any visible guides in place.
    pub fn enable(&mut self, app: &mut A, enabled: bool) {
        if !enabled {
            if let Some(subscriptions) = self.subscriptions.take() {
                subscriptions.release(app.events_mut());
                log::debug!("Snap disabled");
            }
            return;
        }
        if self.subscriptions.is_some() {
            return;
        }

        self.subscriptions = Some(Subscriptions::subscribe(app.events_mut(), &EventKind::ALL));
        log::debug!("Snap enabled");

        let selection = app
            .editor()
            .map(|editor| editor.selection())
            .unwrap_or(Selection::None);
        if !selection.is_empty() {
            self.handle_select(app, &selection);
        }
    }

    /// Detach from the host: stop listening and remove every guide
    /// primitive from the overlay.
    pub fn destroy(mut self, app: &mut A) {
        self.enable(app, false);
        if let Some(sky) = app.sky_mut() {
            self.renderer.destroy(sky);
        }
        self.candidates.clear();
        log::debug!("Snap destroyed");
    }

    /// Route a host event. Kinds the component is not subscribed to are
    /// ignored.
    ///
    /// Returns the match computed for a move event.
    pub fn handle_event(&mut self, app: &mut A, event: &SnapEvent<ShapeIdOf<A>>) -> Option<SnapMatch> {
        let subscribed = self
            .subscriptions
            .as_ref()
            .is_some_and(|subscriptions| subscriptions.covers(event.kind()));
        if !subscribed {
            log::trace!("Ignoring {:?} event", event.kind());
            return None;
        }

        match event {
            SnapEvent::Select(selection) => {
                self.handle_select(app, selection);
                None
            }
            SnapEvent::Move { target } => Some(self.handle_move(app, *target)),
            SnapEvent::PointerUp | SnapEvent::LayoutAfter => {
                self.clear(app);
                None
            }
        }
    }

    /// Rebuild the candidates for a new selection.
    pub fn handle_select(&mut self, app: &A, selection: &Selection<ShapeIdOf<A>>) {
        let viewport = app.zoom_layer().viewport_bounds();
        self.candidates
            .rebuild(app.tree(), viewport, selection, self.filter.as_deref());
    }

    /// Snap the shape (or multi-selection) being dragged and redraw guides.
    ///
    /// `target` is the moved shape; during a multi-selection drag it is the
    /// simulated proxy and the editor's selection is what actually moves.
    pub fn handle_move(&mut self, app: &mut A, target: ShapeIdOf<A>) -> SnapMatch {
        let group: Vec<ShapeIdOf<A>> = app
            .editor()
            .filter(|editor| editor.is_multi_select())
            .map(|editor| editor.selection().ids().to_vec())
            .unwrap_or_default();

        let moving = app.tree().and_then(|tree| {
            if group.len() > 1 {
                extract_group_landmarks(tree, &group)
            } else {
                extract_landmarks(tree, target)
            }
        });
        let Some(moving) = moving else {
            log::trace!("No geometry for moved shape {:?}", target);
            self.clear(app);
            return SnapMatch::default();
        };

        let result = match_landmarks(&moving, self.candidates.landmarks(), self.tolerance(app));
        let delta = result.delta();
        if delta != Vec2::ZERO {
            self.apply_delta(app, target, &group, delta);
        }
        log::trace!(
            "Move {:?}: offset x {:?}, offset y {:?}",
            target,
            result.offset_x,
            result.offset_y
        );

        if self.show_line {
            let style = self.style();
            let show_points = self.show_line_points;
            if let Some((tree, sky)) = app.tree_and_sky() {
                self.renderer.render(sky, tree, &result, &style, show_points);
            }
        } else {
            self.clear(app);
        }
        result
    }

    fn apply_delta(&self, app: &mut A, target: ShapeIdOf<A>, group: &[ShapeIdOf<A>], delta: Vec2) {
        if group.len() <= 1 {
            if let Some(tree) = app.tree_mut() {
                tree.translate(target, delta);
            }
            return;
        }

        if let Some(tree) = app.tree_mut() {
            for &id in group {
                tree.translate(id, delta);
            }
        }
        if !group.contains(&target) {
            app.safe_change(|tree| tree.translate(target, delta));
        }
    }

    /// Hide every guide.
    pub fn clear(&mut self, app: &mut A) {
        if let Some(sky) = app.sky_mut() {
            self.renderer.clear(sky);
        }
    }
}
