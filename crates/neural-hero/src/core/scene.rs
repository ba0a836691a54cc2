use crate::api::types::NodeId;
use crate::components::node::{NodeKind, SceneNode, Transform};

/// Mounted node storage using a flat Vec.
/// Sized for a handful of meshes, not thousands.
pub struct Scene {
    nodes: Vec<SceneNode>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(32)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            next_id: 1,
        }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a node to the scene.
    pub fn spawn(&mut self, node: SceneNode) -> NodeId {
        let id = node.id;
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Copy a transform into a mounted node.
    ///
    /// Returns false and does nothing when the node is not mounted; callers
    /// may run before the host has attached the mesh.
    pub fn set_transform(&mut self, id: NodeId, transform: Transform) -> bool {
        match self.get_mut(id) {
            Some(node) => {
                node.transform = transform;
                true
            }
            None => false,
        }
    }

    /// Iterate over nodes in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter()
    }

    /// Iterate over nodes of one kind in spawn order.
    pub fn iter_kind(&self, kind: NodeKind) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Mutable pass over nodes of one kind in spawn order.
    pub fn iter_kind_mut(&mut self, kind: NodeKind) -> impl Iterator<Item = &mut SceneNode> {
        self.nodes.iter_mut().filter(move |n| n.kind == kind)
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
