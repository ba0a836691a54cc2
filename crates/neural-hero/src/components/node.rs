use glam::DVec3;
use crate::api::types::NodeId;
use crate::components::mesh::{Geometry, Material};

/// Position and Euler rotation (radians, XYZ order) of a node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: DVec3,
    pub rotation: DVec3,
}

impl Transform {
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            rotation: DVec3::ZERO,
        }
    }
}

/// Role of a node inside the hero scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Sphere,
    Particle,
}

/// A drawable mesh node: geometry reference, transform, material.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: NodeId,
    /// String tag for finding nodes by name.
    pub tag: String,
    pub kind: NodeKind,
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
}

impl SceneNode {
    pub fn new(id: NodeId, kind: NodeKind, geometry: Geometry, material: Material) -> Self {
        Self {
            id,
            tag: String::new(),
            kind,
            geometry,
            material,
            transform: Transform::default(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}
