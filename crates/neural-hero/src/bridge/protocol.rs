/// Shared frame buffer layout.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 20 floats]
/// [Camera: 20 floats (view-projection 16, eye 4)]
/// [Lights: max_lights × 8 floats]
/// [Instances: max_instances × 12 floats]
/// [Polyline: max_vertices × 3 floats]
/// ```
///
/// Capacities are written into the header on every frame.
/// The host reads them from the header to compute offsets.

use crate::api::config::SceneConfig;
use crate::api::hero::HeroScene;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::NodeInstance;
use crate::systems::lighting::PointLight;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 20;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_VERTICES: usize = 4;
pub const HEADER_VERTEX_COUNT: usize = 5;
pub const HEADER_MAX_LIGHTS: usize = 6;
pub const HEADER_LIGHT_COUNT: usize = 7;
pub const HEADER_AMBIENT_R: usize = 8;
pub const HEADER_AMBIENT_G: usize = 9;
pub const HEADER_AMBIENT_B: usize = 10;
pub const HEADER_OVERLAY_VISIBLE: usize = 11;
pub const HEADER_OVERLAY_SIDE: usize = 12;
pub const HEADER_OVERLAY_VERTICAL: usize = 13;
pub const HEADER_OVERLAY_OFFSET_X: usize = 14;
pub const HEADER_OVERLAY_OPACITY: usize = 15;
pub const HEADER_OVERLAY_CYCLE: usize = 16;
pub const HEADER_OVERLAY_PHASE: usize = 17;
pub const HEADER_ELAPSED: usize = 18;
pub const HEADER_FLAGS: usize = 19;

/// Header flag bits.
pub const FLAG_HAS_OVERLAY: u32 = 1;
pub const FLAG_AUTO_ROTATE: u32 = 2;
pub const FLAG_ZOOM_ENABLED: u32 = 4;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera section (wire format, never changes).
pub const CAMERA_FLOATS: usize = 20;

/// Floats per point light (wire format, never changes).
pub const LIGHT_FLOATS: usize = PointLight::FLOATS;

/// Floats per node instance (wire format, never changes).
pub const INSTANCE_FLOATS: usize = NodeInstance::FLOATS;

/// Floats per polyline vertex: x, y, z.
pub const VERTEX_FLOATS: usize = 3;

/// Light slots reserved even when the config declares fewer.
pub const DEFAULT_MAX_LIGHTS: usize = 4;

/// Buffer layout computed from the scene's capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_lights: usize,
    pub max_instances: usize,
    pub max_vertices: usize,

    pub camera_offset: usize,
    pub light_data_offset: usize,
    pub instance_data_offset: usize,
    pub vertex_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_lights: usize, max_instances: usize, max_vertices: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let light_data_offset = camera_offset + CAMERA_FLOATS;
        let instance_data_offset = light_data_offset + max_lights * LIGHT_FLOATS;
        let vertex_data_offset = instance_data_offset + max_instances * INSTANCE_FLOATS;
        let buffer_total_floats = vertex_data_offset + max_vertices * VERTEX_FLOATS;

        Self {
            max_lights,
            max_instances,
            max_vertices,
            camera_offset,
            light_data_offset,
            instance_data_offset,
            vertex_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Size every section for the nodes `config` will mount.
    pub fn from_config(config: &SceneConfig) -> Self {
        let particles = config.particles.count;
        let sphere = usize::from(config.sphere.is_some());
        let vertices = if config.particles.connect { particles } else { 0 };
        let lights = DEFAULT_MAX_LIGHTS.max(usize::from(config.lights.point.is_some()));
        Self::new(lights, particles + sphere, vertices)
    }

    /// Write one frame of `hero` into `out`, resizing it to the full layout.
    /// Entries beyond a section's capacity are dropped.
    pub fn write_frame(&self, hero: &HeroScene, frame_counter: u32, out: &mut Vec<f32>) {
        out.clear();
        out.resize(self.buffer_total_floats, 0.0);

        let draw = hero.draw_buffer();
        let lights = hero.lights();
        let instance_count = draw.instance_count().min(self.max_instances);
        let vertex_count = draw.vertex_count().min(self.max_vertices);
        let light_count = lights.count().min(self.max_lights);

        let header = &mut out[..HEADER_FLOATS];
        header[HEADER_FRAME_COUNTER] = frame_counter as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = instance_count as f32;
        header[HEADER_MAX_VERTICES] = self.max_vertices as f32;
        header[HEADER_VERTEX_COUNT] = vertex_count as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header[HEADER_LIGHT_COUNT] = light_count as f32;
        let [r, g, b] = lights.ambient().radiance();
        header[HEADER_AMBIENT_R] = r;
        header[HEADER_AMBIENT_G] = g;
        header[HEADER_AMBIENT_B] = b;
        header[HEADER_ELAPSED] = hero.elapsed() as f32;

        let camera = hero.camera();
        let mut flags = 0;
        if camera.auto_rotate {
            flags |= FLAG_AUTO_ROTATE;
        }
        if camera.zoom_enabled {
            flags |= FLAG_ZOOM_ENABLED;
        }
        if let Some(snap) = hero.overlay_snapshot() {
            flags |= FLAG_HAS_OVERLAY;
            header[HEADER_OVERLAY_VISIBLE] = if snap.visible { 1.0 } else { 0.0 };
            header[HEADER_OVERLAY_SIDE] = snap.side.as_u32() as f32;
            header[HEADER_OVERLAY_VERTICAL] = snap.vertical_percent as f32;
            header[HEADER_OVERLAY_OFFSET_X] = snap.offset_x;
            header[HEADER_OVERLAY_OPACITY] = snap.opacity;
            header[HEADER_OVERLAY_CYCLE] = snap.cycle_id as f32;
            header[HEADER_OVERLAY_PHASE] = snap.phase.as_u32() as f32;
        }
        header[HEADER_FLAGS] = flags as f32;

        let uniform: CameraUniform = camera.uniform();
        let camera_floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&uniform));
        out[self.camera_offset..self.camera_offset + CAMERA_FLOATS].copy_from_slice(camera_floats);

        let light_floats: &[f32] = bytemuck::cast_slice(&lights.lights()[..light_count]);
        out[self.light_data_offset..self.light_data_offset + light_floats.len()].copy_from_slice(light_floats);

        let instance_floats = &draw.as_floats()[..instance_count * INSTANCE_FLOATS];
        out[self.instance_data_offset..self.instance_data_offset + instance_floats.len()]
            .copy_from_slice(instance_floats);

        let vertex_floats = &draw.polyline()[..vertex_count * VERTEX_FLOATS];
        out[self.vertex_data_offset..self.vertex_data_offset + vertex_floats.len()]
            .copy_from_slice(vertex_floats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_layout_sizes() {
        let layout = ProtocolLayout::from_config(&SceneConfig::hero());
        assert_eq!(layout.max_lights, 4);
        assert_eq!(layout.max_instances, 26);
        assert_eq!(layout.max_vertices, 0);
        assert_eq!(layout.camera_offset, 20);
        assert_eq!(layout.light_data_offset, 40);
        assert_eq!(layout.instance_data_offset, 40 + 4 * 8);
        assert_eq!(layout.buffer_total_floats, 72 + 26 * 12);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn net_layout_reserves_polyline() {
        let layout = ProtocolLayout::from_config(&SceneConfig::net());
        assert_eq!(layout.max_instances, 20);
        assert_eq!(layout.max_vertices, 20);
        assert_eq!(layout.vertex_data_offset, layout.instance_data_offset + 20 * 12);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(2, 10, 5);
        assert_eq!(layout.light_data_offset, layout.camera_offset + CAMERA_FLOATS);
        assert_eq!(layout.instance_data_offset, layout.light_data_offset + 2 * LIGHT_FLOATS);
        assert_eq!(layout.vertex_data_offset, layout.instance_data_offset + 10 * INSTANCE_FLOATS);
        assert_eq!(layout.buffer_total_floats, layout.vertex_data_offset + 5 * VERTEX_FLOATS);
    }

    #[test]
    fn write_frame_fills_header_and_sections() {
        let mut hero = HeroScene::default();
        hero.mount();
        hero.frame(0.016);
        hero.advance_timers(7_100);

        let layout = ProtocolLayout::from_config(hero.config());
        let mut out = Vec::new();
        layout.write_frame(&hero, 3, &mut out);

        assert_eq!(out.len(), layout.buffer_total_floats);
        assert_eq!(out[HEADER_FRAME_COUNTER], 3.0);
        assert_eq!(out[HEADER_INSTANCE_COUNT], 26.0);
        assert_eq!(out[HEADER_LIGHT_COUNT], 1.0);
        assert_eq!(out[HEADER_OVERLAY_VISIBLE], 1.0);
        assert_eq!(out[HEADER_OVERLAY_CYCLE], 1.0);
        assert_eq!(out[HEADER_FLAGS] as u32 & FLAG_HAS_OVERLAY, FLAG_HAS_OVERLAY);
        assert_eq!(out[HEADER_FLAGS] as u32 & FLAG_ZOOM_ENABLED, 0);

        // First light is the point light at (10, 10, 10).
        assert_eq!(&out[layout.light_data_offset..layout.light_data_offset + 3], &[10.0, 10.0, 10.0]);
        // First instance is the sphere.
        assert_eq!(out[layout.instance_data_offset + 6], 2.0);
    }

    #[test]
    fn write_frame_clamps_to_capacity() {
        let mut hero = HeroScene::default();
        hero.mount();
        hero.frame(0.016);

        let layout = ProtocolLayout::new(0, 5, 0);
        let mut out = Vec::new();
        layout.write_frame(&hero, 0, &mut out);
        assert_eq!(out[HEADER_INSTANCE_COUNT], 5.0);
        assert_eq!(out[HEADER_LIGHT_COUNT], 0.0);
        assert_eq!(out.len(), layout.buffer_total_floats);
    }
}
