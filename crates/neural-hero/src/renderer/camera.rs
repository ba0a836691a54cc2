use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use crate::api::config::CameraConfig;

/// Perspective camera orbiting a fixed target.
/// Produces the view-projection matrix the host uploads as a uniform.
pub struct CameraRig {
    /// Eye position in world space.
    pub position: Vec3,
    /// Look-at point.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport width / height.
    pub aspect: f32,
    /// Orbit control flags. Zoom stays off for the hero section.
    pub zoom_enabled: bool,
    pub auto_rotate: bool,
    /// Auto-rotate speed in orbit-control units (2.0 = one turn per 30 s at 60 fps).
    pub auto_rotate_speed: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    /// Eye position, w unused.
    pub eye: [f32; 4],
}

impl CameraRig {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            position: Vec3::from_array(config.position),
            target: Vec3::from_array(config.target),
            fov_deg: config.fov_deg,
            near: config.near,
            far: config.far,
            aspect: 1.0,
            zoom_enabled: config.zoom_enabled,
            auto_rotate: config.auto_rotate,
            auto_rotate_speed: config.auto_rotate_speed,
        }
    }

    /// Update the aspect ratio from the canvas size. Degenerate sizes are ignored.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        if viewport_width > 0.0 && viewport_height > 0.0 {
            self.aspect = viewport_width / viewport_height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: self.view_projection().to_cols_array_2d(),
            eye: self.position.extend(1.0).to_array(),
        }
    }

    /// Orbit the eye around the target's Y axis when auto-rotate is on.
    /// Same cadence as orbit controls: `2π / 60 * speed` radians per second.
    pub fn orbit(&mut self, dt: f32) {
        if !self.auto_rotate || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let angle = std::f32::consts::TAU / 60.0 * self.auto_rotate_speed * dt;
        let offset = self.position - self.target;
        let rotated = glam::Quat::from_rotation_y(angle) * offset;
        self.position = self.target + rotated;
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}
