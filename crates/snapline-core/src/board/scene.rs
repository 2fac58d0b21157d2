//! In-memory scene tree.

use super::node::{Node, NodeId, NodeKind};
use crate::host::SceneTree;
use crate::viewport::ZoomLayer;
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// All nodes of a board, keyed by ID, with a page frame at the root.
#[derive(Debug, Clone)]
pub struct Scene {
    /// All nodes, keyed by ID.
    pub nodes: HashMap<NodeId, Node>,
    /// Z-order of nodes (back to front).
    pub z_order: Vec<NodeId>,
    /// Pan and zoom of the view showing this scene.
    pub zoom: ZoomLayer,
    root: NodeId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene holding only the page frame.
    pub fn new() -> Self {
        let zoom = ZoomLayer::default();
        let root = Node::root(zoom.width, zoom.height);
        let root_id = root.id();
        Self {
            nodes: HashMap::from([(root_id, root)]),
            z_order: vec![root_id],
            zoom,
            root: root_id,
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Add a node on top of the others.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id();
        self.z_order.push(id);
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node. The page frame cannot be removed.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        if id == self.root {
            return None;
        }
        self.z_order.retain(|&node_id| node_id != id);
        self.nodes.remove(&id)
    }

    /// Get a node by ID.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Get nodes in z-order (back to front).
    pub fn nodes_ordered(&self) -> impl Iterator<Item = &Node> {
        self.z_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Union box of several nodes.
    pub fn union_bounds(&self, ids: &[NodeId]) -> Option<Rect> {
        ids.iter()
            .filter_map(|&id| self.layout_bounds(id))
            .reduce(|acc, bounds| acc.union(bounds))
    }

    /// Number of nodes, page frame included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl SceneTree for Scene {
    type Id = NodeId;

    fn shapes(&self) -> Vec<NodeId> {
        self.z_order.clone()
    }

    fn is_structural(&self, id: NodeId) -> bool {
        self.get_node(id).is_some_and(|node| node.kind == NodeKind::Root)
    }

    fn is_simulated(&self, id: NodeId) -> bool {
        self.get_node(id).is_some_and(|node| node.simulated)
    }

    fn is_snappable(&self, id: NodeId) -> bool {
        self.get_node(id).is_some_and(|node| node.snappable)
    }

    fn layout_points(&self, id: NodeId) -> Option<[Point; 4]> {
        self.get_node(id).map(Node::corners)
    }

    fn world_point(&self, point: Point) -> Point {
        self.zoom.tree_to_world(point)
    }

    fn position(&self, id: NodeId) -> Option<Point> {
        self.get_node(id).map(|node| node.position)
    }

    fn set_position(&mut self, id: NodeId, position: Point) {
        if let Some(node) = self.get_node_mut(id) {
            node.position = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    #[test]
    fn test_new_scene_has_root() {
        let scene = Scene::new();
        assert_eq!(scene.len(), 1);
        assert!(scene.is_structural(scene.root_id()));
        assert_eq!(scene.shapes(), vec![scene.root_id()]);
    }

    #[test]
    fn test_add_and_remove() {
        let mut scene = Scene::new();
        let id = scene.add_node(Node::rect(Point::new(0.0, 0.0), 10.0, 10.0));
        assert_eq!(scene.len(), 2);
        assert!(!scene.is_structural(id));
        assert!(scene.remove_node(id).is_some());
        assert!(scene.get_node(id).is_none());
        assert!(scene.remove_node(scene.root_id()).is_none());
    }

    #[test]
    fn test_translate() {
        let mut scene = Scene::new();
        let id = scene.add_node(Node::rect(Point::new(10.0, 10.0), 10.0, 10.0));
        scene.translate(id, Vec2::new(-3.0, 2.0));
        assert_eq!(scene.position(id), Some(Point::new(7.0, 12.0)));
        assert_eq!(scene.layout_bounds(id), Some(Rect::new(7.0, 12.0, 17.0, 22.0)));
    }

    #[test]
    fn test_union_bounds() {
        let mut scene = Scene::new();
        let a = scene.add_node(Node::rect(Point::new(0.0, 0.0), 10.0, 10.0));
        let b = scene.add_node(Node::rect(Point::new(50.0, 20.0), 10.0, 10.0));
        assert_eq!(scene.union_bounds(&[a, b]), Some(Rect::new(0.0, 0.0, 60.0, 30.0)));
        assert_eq!(scene.union_bounds(&[]), None);
    }

    #[test]
    fn test_unknown_ids() {
        let scene = Scene::new();
        let missing = uuid::Uuid::new_v4();
        assert!(!scene.is_snappable(missing));
        assert!(scene.layout_points(missing).is_none());
        assert!(scene.position(missing).is_none());
    }
}
