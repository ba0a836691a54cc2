//! Scene lights: one ambient term plus persistent point lights.
//!
//! Lights stay until removed. Each frame the composer copies them into
//! the draw list for the host's lighting pass.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::api::config::LightConfig;
use crate::components::mesh::Color;

/// A 3D point light.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, _pad]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    pub _pad: f32,
}

impl PointLight {
    pub const FLOATS: usize = 8;

    pub fn new(pos: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            _pad: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Ambient color and intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    /// Color premultiplied by intensity.
    pub fn radiance(&self) -> [f32; 3] {
        [
            self.color.r * self.intensity,
            self.color.g * self.intensity,
            self.color.b * self.intensity,
        ]
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Color::white(),
            intensity: 1.0,
        }
    }
}

/// Manages the ambient term and active point lights.
#[derive(Debug, Clone, Default)]
pub struct LightState {
    ambient: AmbientLight,
    lights: Vec<PointLight>,
}

impl LightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LightConfig) -> Self {
        let mut state = Self::new();
        state.set_ambient(config.ambient_color, config.ambient_intensity);
        if let Some(point) = &config.point {
            state.add(PointLight::new(
                Vec3::from_array(point.position),
                point.color,
                point.intensity,
            ));
        }
        state
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, color: Color, intensity: f32) {
        self.ambient = AmbientLight { color, intensity };
    }

    pub fn ambient(&self) -> AmbientLight {
        self.ambient
    }
}
