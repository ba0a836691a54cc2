use crate::api::types::NodeId;
use crate::components::node::NodeKind;
use crate::core::scene::Scene;
use crate::renderer::instance::{DrawBuffer, NodeInstance};
use crate::systems::lighting::{AmbientLight, LightState, PointLight};

/// One entry of the per-frame draw list, in submission order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawItem {
    Ambient(AmbientLight),
    Light(PointLight),
    /// Index into the frame's [`DrawBuffer`] instances.
    Mesh { node: NodeId, kind: NodeKind, instance: usize },
    /// Line strip through `vertex_count` vertices of the polyline buffer.
    Polyline { vertex_count: usize },
}

/// Flattens the scene into a draw list and instance buffer.
///
/// Order is fixed: lights, sphere, particles, polyline.
pub struct SceneComposer {
    connect: bool,
    items: Vec<DrawItem>,
}

impl SceneComposer {
    /// `connect` draws a polyline through the particles in spawn order.
    pub fn new(connect: bool) -> Self {
        Self {
            connect,
            items: Vec::with_capacity(64),
        }
    }

    /// Rebuild the draw list and `buffer` from the current scene.
    pub fn compose(&mut self, scene: &Scene, lights: &LightState, buffer: &mut DrawBuffer) -> &[DrawItem] {
        self.items.clear();
        buffer.clear();

        self.items.push(DrawItem::Ambient(lights.ambient()));
        for light in lights.iter() {
            self.items.push(DrawItem::Light(*light));
        }

        for kind in [NodeKind::Sphere, NodeKind::Particle] {
            for node in scene.iter_kind(kind) {
                self.items.push(DrawItem::Mesh {
                    node: node.id,
                    kind,
                    instance: buffer.instance_count(),
                });
                buffer.push(NodeInstance::from_node(node));
            }
        }

        if self.connect {
            for node in scene.iter_kind(NodeKind::Particle) {
                buffer.push_vertex(node.transform.position.as_vec3().to_array());
            }
            if buffer.vertex_count() >= 2 {
                self.items.push(DrawItem::Polyline {
                    vertex_count: buffer.vertex_count(),
                });
            }
        }

        &self.items
    }

    /// Draw list from the last [`compose`](Self::compose).
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }
}
