use bytemuck::{Pod, Zeroable};
use crate::components::node::SceneNode;

/// Instance flag: render edges only.
pub const FLAG_WIREFRAME: u32 = 1;

/// Per-node render data read by the host.
/// 12 floats = 48 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct NodeInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Euler rotation in radians (XYZ order).
    pub rx: f32,
    pub ry: f32,
    pub rz: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Emissive intensity; the emissive color is the base color.
    pub emissive: f32,
    /// Bit set of `FLAG_*` values, stored as a float.
    pub flags: f32,
}

impl NodeInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_node(node: &SceneNode) -> Self {
        let p = node.transform.position.as_vec3();
        let rot = node.transform.rotation.as_vec3();
        let mut flags = 0;
        if node.material.wireframe {
            flags |= FLAG_WIREFRAME;
        }
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
            rx: rot.x,
            ry: rot.y,
            rz: rot.z,
            radius: node.geometry.radius(),
            r: node.material.color.r,
            g: node.material.color.g,
            b: node.material.color.b,
            emissive: node.material.emissive_intensity,
            flags: flags as f32,
        }
    }

    pub fn is_wireframe(&self) -> bool {
        (self.flags as u32) & FLAG_WIREFRAME != 0
    }
}

/// Node instances plus the connecting polyline, rebuilt every frame.
pub struct DrawBuffer {
    instances: Vec<NodeInstance>,
    /// Flat `[x, y, z, x, y, z, ...]` vertex list.
    polyline: Vec<f32>,
}

impl DrawBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            polyline: Vec::with_capacity(max * 3),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.polyline.clear();
    }

    pub fn push(&mut self, instance: NodeInstance) {
        self.instances.push(instance);
    }

    pub fn push_vertex(&mut self, v: [f32; 3]) {
        self.polyline.extend_from_slice(&v);
    }

    pub fn instances(&self) -> &[NodeInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn polyline(&self) -> &[f32] {
        &self.polyline
    }

    pub fn vertex_count(&self) -> usize {
        self.polyline.len() / 3
    }

    pub fn polyline_ptr(&self) -> *const f32 {
        self.polyline.as_ptr()
    }

    /// Instances as one flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for DrawBuffer {
    fn default() -> Self {
        Self::new()
    }
}
