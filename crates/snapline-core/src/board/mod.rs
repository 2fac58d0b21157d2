//! Reference in-memory host.
//!
//! [`Board`] implements every capability the snap component needs: a scene
//! tree, an editor selection, an overlay and an event hub. It backs the
//! tests and the playground.

mod node;
mod scene;
mod sky;

pub use node::{Node, NodeId, NodeKind};
pub use scene::Scene;
pub use sky::Sky;

use crate::events::{EventHub, EventKind, ListenerKey, Selection, SnapEvent};
use crate::host::{SceneTree, SelectionSource, SnapApp};
use crate::matcher::SnapMatch;
use crate::snap::Snap;
use crate::viewport::ZoomLayer;
use kurbo::{Point, Vec2};
use std::collections::HashMap;

/// Selection state of the board's editor.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    /// Currently selected node IDs, in selection order.
    pub selection: Vec<NodeId>,
}

impl EditorState {
    /// Select a node (clears previous selection).
    pub fn select(&mut self, id: NodeId) {
        self.clear_selection();
        self.add_to_selection(id);
    }

    /// Add to selection.
    pub fn add_to_selection(&mut self, id: NodeId) {
        if !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

impl SelectionSource for EditorState {
    type Id = NodeId;

    fn selection(&self) -> Selection<NodeId> {
        Selection::from_list(self.selection.clone())
    }

    fn is_multi_select(&self) -> bool {
        self.selection.len() > 1
    }
}

/// Event hub remembering which kinds have live listeners.
#[derive(Debug, Clone, Default)]
pub struct Listeners {
    next: u64,
    live: HashMap<ListenerKey, EventKind>,
}

impl Listeners {
    /// Check if anyone listens to `kind`.
    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.live.values().any(|&k| k == kind)
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl EventHub for Listeners {
    fn on(&mut self, kind: EventKind) -> ListenerKey {
        self.next += 1;
        let key = ListenerKey(self.next);
        self.live.insert(key, kind);
        key
    }

    fn off(&mut self, key: ListenerKey) {
        self.live.remove(&key);
    }
}

/// An editor board: scene, selection, overlay and event hub.
#[derive(Debug, Clone)]
pub struct Board {
    scene: Option<Scene>,
    editor: Option<EditorState>,
    sky: Option<Sky>,
    /// Event registrations.
    pub listeners: Listeners,
    proxy: Option<NodeId>,
    safe_changes: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board with an empty scene.
    pub fn new() -> Self {
        Self {
            scene: Some(Scene::new()),
            editor: Some(EditorState::default()),
            sky: Some(Sky::new()),
            listeners: Listeners::default(),
            proxy: None,
            safe_changes: 0,
        }
    }

    /// A board whose tree layer is missing.
    pub fn without_tree() -> Self {
        Self {
            scene: None,
            ..Self::new()
        }
    }

    /// A board without an editor.
    pub fn without_editor() -> Self {
        Self {
            editor: None,
            ..Self::new()
        }
    }

    /// A board whose sky layer is missing.
    pub fn without_sky() -> Self {
        Self {
            sky: None,
            ..Self::new()
        }
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    /// Number of changes made through [`SnapApp::safe_change`].
    pub fn safe_changes(&self) -> usize {
        self.safe_changes
    }

    /// The drag proxy, while a multi-selection drag is in progress.
    pub fn proxy(&self) -> Option<NodeId> {
        self.proxy
    }

    /// Add a rectangle to the scene.
    ///
    /// The ID is returned even when the board has no scene, in which case
    /// the node is dropped.
    pub fn add_rect(&mut self, position: Point, width: f64, height: f64) -> NodeId {
        let node = Node::rect(position, width, height);
        let id = node.id();
        if let Some(scene) = self.scene.as_mut() {
            scene.add_node(node);
        }
        id
    }

    /// Get a node's position.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.scene.as_ref()?.position(id)
    }

    /// Replace the editor selection without notifying anyone.
    pub fn set_selection(&mut self, ids: &[NodeId]) {
        if let Some(editor) = self.editor.as_mut() {
            editor.clear_selection();
            for &id in ids {
                editor.add_to_selection(id);
            }
        }
    }

    /// Replace the editor selection and report the change.
    pub fn select(&mut self, snap: &mut Snap<Board>, ids: &[NodeId]) {
        self.set_selection(ids);
        let selection = Selection::from_list(ids.to_vec());
        self.dispatch(snap, SnapEvent::Select(selection));
    }

    /// Create the simulated proxy covering the current selection.
    pub fn begin_multi_drag(&mut self) -> Option<NodeId> {
        let ids = self.editor.as_ref()?.selection.clone();
        let scene = self.scene.as_mut()?;
        let bounds = scene.union_bounds(&ids)?;
        let id = scene.add_node(Node::proxy(bounds));
        self.proxy = Some(id);
        Some(id)
    }

    /// Remove the drag proxy, if any.
    pub fn end_multi_drag(&mut self) {
        if let (Some(id), Some(scene)) = (self.proxy.take(), self.scene.as_mut()) {
            scene.remove_node(id);
        }
    }

    /// Move the selection by `delta` the way a pointer drag would, then
    /// report the move.
    ///
    /// In a multi-selection drag the proxy moves along and is reported as
    /// the target; otherwise `target` is.
    pub fn drag_by(&mut self, snap: &mut Snap<Board>, target: NodeId, delta: Vec2) -> Option<SnapMatch> {
        let selected = self
            .editor
            .as_ref()
            .map(|editor| editor.selection.clone())
            .unwrap_or_default();
        let target = match self.proxy {
            Some(proxy) => proxy,
            None => target,
        };

        if let Some(scene) = self.scene.as_mut() {
            for &id in &selected {
                scene.translate(id, delta);
            }
            if !selected.contains(&target) {
                scene.translate(target, delta);
            }
        }
        self.dispatch(snap, SnapEvent::Move { target })
    }

    /// Release the pointer, ending any multi-selection drag.
    pub fn release(&mut self, snap: &mut Snap<Board>) {
        self.dispatch(snap, SnapEvent::PointerUp);
        self.end_multi_drag();
    }

    /// Forward an event to the snap component.
    pub fn dispatch(&mut self, snap: &mut Snap<Board>, event: SnapEvent<NodeId>) -> Option<SnapMatch> {
        snap.handle_event(self, &event)
    }
}

impl SnapApp for Board {
    type Tree = Scene;
    type Editor = EditorState;
    type Sky = Sky;

    fn tree(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    fn tree_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    fn editor(&self) -> Option<&EditorState> {
        self.editor.as_ref()
    }

    fn sky(&self) -> Option<&Sky> {
        self.sky.as_ref()
    }

    fn sky_mut(&mut self) -> Option<&mut Sky> {
        self.sky.as_mut()
    }

    fn tree_and_sky(&mut self) -> Option<(&Scene, &mut Sky)> {
        Some((self.scene.as_ref()?, self.sky.as_mut()?))
    }

    fn zoom_layer(&self) -> ZoomLayer {
        self.scene
            .as_ref()
            .map(|scene| scene.zoom)
            .unwrap_or_default()
    }

    fn events_mut(&mut self) -> &mut dyn EventHub {
        &mut self.listeners
    }

    fn safe_change<F: FnOnce(&mut Scene)>(&mut self, change: F) {
        if let Some(scene) = self.scene.as_mut() {
            self.safe_changes += 1;
            change(scene);
        }
    }
}
