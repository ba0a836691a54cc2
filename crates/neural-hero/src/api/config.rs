use serde::{Deserialize, Serialize};
use crate::api::error::ConfigError;
use crate::components::mesh::Color;
use crate::core::time::StepMode;
use crate::extensions::easing::Easing;

/// How particles move once spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleMotion {
    /// Circle around the base position in the XY plane.
    #[default]
    Orbit,
    /// Stay at the base position.
    Static,
}

/// Particle field generation and motion parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Number of particles, fixed at construction.
    pub count: usize,
    /// Base positions are drawn from `[-half_extent, half_extent]` per axis.
    pub half_extent: f64,
    /// Lower bound of per-particle angular speed (inclusive).
    pub speed_min: f64,
    /// Upper bound of per-particle angular speed (exclusive).
    pub speed_max: f64,
    /// Orbit radius. Independent of `half_extent`, so particles can leave
    /// their spawn cube.
    pub orbit_radius: f64,
    pub motion: ParticleMotion,
    /// Mesh radius of each particle.
    pub radius: f32,
    pub segments: u32,
    pub color: Color,
    pub emissive_intensity: f32,
    /// Draw a polyline through the particles in generation order.
    pub connect: bool,
}

impl ParticleConfig {
    /// The swirling "neural network" cloud around the hero sphere.
    pub fn network() -> Self {
        Self {
            count: 25,
            half_extent: 7.0,
            speed_min: 0.12,
            speed_max: 0.28,
            orbit_radius: 10.25,
            motion: ParticleMotion::Orbit,
            radius: 0.06,
            segments: 8,
            color: Color::accent(),
            emissive_intensity: 0.6,
            connect: false,
        }
    }

    /// The small static point cloud joined by a polyline.
    pub fn net() -> Self {
        Self {
            count: 20,
            half_extent: 1.5,
            orbit_radius: 0.0,
            motion: ParticleMotion::Static,
            radius: 0.05,
            segments: 16,
            emissive_intensity: 0.0,
            connect: true,
            ..Self::network()
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self::network()
    }
}

/// Constants of the floating wireframe sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub radius: f32,
    pub segments: u32,
    /// Rotation added to `rotation.y` on every update pass.
    pub yaw_step: f64,
    /// Rotation added to `rotation.x` on every update pass.
    pub pitch_step: f64,
    /// Scale applied to the pointer position before it is added to rotation.
    pub pointer_gain: f64,
    /// `position.y = sin(t) * bob_amplitude`.
    pub bob_amplitude: f64,
    /// `position.x = cos(t * sway_frequency) * sway_amplitude`.
    pub sway_amplitude: f64,
    pub sway_frequency: f64,
    pub color: Color,
    pub emissive_intensity: f32,
    pub wireframe: bool,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            segments: 64,
            yaw_step: 0.002,
            pitch_step: 0.001,
            pointer_gain: 0.001,
            bob_amplitude: 0.3,
            sway_amplitude: 0.2,
            sway_frequency: 0.5,
            color: Color::accent(),
            emissive_intensity: 0.4,
            wireframe: true,
        }
    }
}

/// Timing and placement of the peeking overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Period of the re-spawn timer.
    pub period_ms: u64,
    /// Hidden gap between a re-spawn and the overlay appearing.
    pub reveal_delay_ms: u64,
    /// How long the overlay stays visible once revealed.
    pub visible_ms: u64,
    /// Duration of the entry and exit slides.
    pub slide_ms: u64,
    /// Horizontal distance the overlay slides in from.
    pub slide_offset: f32,
    pub easing: Easing,
    /// Vertical spawn position, percent of the viewport, `[min, max)`.
    pub vertical_min: u32,
    pub vertical_max: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            period_ms: 7_000,
            reveal_delay_ms: 100,
            visible_ms: 5_000,
            slide_ms: 2_000,
            slide_offset: 160.0,
            easing: Easing::CubicOut,
            vertical_min: 20,
            vertical_max: 80,
        }
    }
}

/// Scripted chat widget replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub greeting: String,
    pub thinking: String,
    pub reply: String,
    pub reply_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: "Hi! Ask us about our AI services.".to_string(),
            thinking: "Thinking...".to_string(),
            reply: "Thanks! Our team will contact you soon.".to_string(),
            reply_delay_ms: 800,
        }
    }
}

/// A point light in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLightConfig {
    pub position: [f32; 3],
    pub color: Color,
    pub intensity: f32,
}

impl Default for PointLightConfig {
    fn default() -> Self {
        Self {
            position: [10.0, 10.0, 10.0],
            color: Color::white(),
            intensity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub ambient_color: Color,
    pub ambient_intensity: f32,
    pub point: Option<PointLightConfig>,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            ambient_color: Color::white(),
            ambient_intensity: 1.3,
            point: Some(PointLightConfig::default()),
        }
    }
}

/// Camera placement plus the flags handed to the host's orbit control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub zoom_enabled: bool,
    pub auto_rotate: bool,
    /// Orbit control auto-rotate speed (2.0 is one turn per 30 s at 60 fps).
    pub auto_rotate_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 4.0],
            target: [0.0, 0.0, 0.0],
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            zoom_enabled: false,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
        }
    }
}

/// Everything tunable about the scene. Defaults reproduce the hero section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for particle placement and overlay spawn positions.
    pub seed: u64,
    pub step_mode: StepMode,
    pub particles: ParticleConfig,
    /// `None` omits the sphere.
    pub sphere: Option<SphereConfig>,
    /// `None` disables the overlay scheduler.
    pub overlay: Option<OverlayConfig>,
    /// `None` disables the chat widget.
    pub chat: Option<ChatConfig>,
    pub lights: LightConfig,
    pub camera: CameraConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::hero()
    }
}

impl SceneConfig {
    /// Sphere, orbiting network, overlay and chat.
    pub fn hero() -> Self {
        Self {
            seed: 42,
            step_mode: StepMode::PerInvocation,
            particles: ParticleConfig::network(),
            sphere: Some(SphereConfig::default()),
            overlay: Some(OverlayConfig::default()),
            chat: Some(ChatConfig::default()),
            lights: LightConfig::default(),
            camera: CameraConfig::default(),
        }
    }

    /// Static point cloud with an auto-rotating camera and ambient light only.
    pub fn net() -> Self {
        Self {
            particles: ParticleConfig::net(),
            sphere: None,
            overlay: None,
            chat: None,
            lights: LightConfig {
                ambient_intensity: 1.0,
                point: None,
                ..LightConfig::default()
            },
            camera: CameraConfig {
                position: [0.0, 0.0, 5.0],
                auto_rotate: true,
                ..CameraConfig::default()
            },
            ..Self::hero()
        }
    }

    /// Parse a config from JSON and validate it. Missing fields take the
    /// hero defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the scene cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.particles;
        if p.count == 0 {
            return Err(ConfigError::invalid("particles.count", "must be at least 1"));
        }
        if !(p.half_extent.is_finite() && p.half_extent >= 0.0) {
            return Err(ConfigError::invalid(
                "particles.half_extent",
                format!("must be finite and non-negative, got {}", p.half_extent),
            ));
        }
        if !(p.speed_min.is_finite() && p.speed_max.is_finite() && p.speed_min < p.speed_max) {
            return Err(ConfigError::invalid(
                "particles.speed_min",
                format!("range [{}, {}) is empty", p.speed_min, p.speed_max),
            ));
        }
        if !(p.orbit_radius.is_finite() && p.orbit_radius >= 0.0) {
            return Err(ConfigError::invalid(
                "particles.orbit_radius",
                format!("must be finite and non-negative, got {}", p.orbit_radius),
            ));
        }

        if let StepMode::Fixed { dt } = self.step_mode {
            if !(dt.is_finite() && dt > 0.0) {
                return Err(ConfigError::invalid(
                    "step_mode.dt",
                    format!("must be positive, got {}", dt),
                ));
            }
        }

        if let Some(overlay) = &self.overlay {
            if overlay.period_ms == 0 {
                return Err(ConfigError::invalid("overlay.period_ms", "must be positive"));
            }
            let window = overlay.reveal_delay_ms.saturating_add(overlay.visible_ms);
            if window >= overlay.period_ms {
                return Err(ConfigError::invalid(
                    "overlay.visible_ms",
                    format!(
                        "reveal delay + visible time ({} ms) must fit inside the period ({} ms)",
                        window, overlay.period_ms
                    ),
                ));
            }
            if overlay.slide_ms > overlay.visible_ms {
                return Err(ConfigError::invalid(
                    "overlay.slide_ms",
                    format!(
                        "slide ({} ms) must finish within the visible time ({} ms)",
                        overlay.slide_ms, overlay.visible_ms
                    ),
                ));
            }
            if overlay.vertical_min >= overlay.vertical_max || overlay.vertical_max > 100 {
                return Err(ConfigError::invalid(
                    "overlay.vertical_min",
                    format!(
                        "range [{}, {}) must be non-empty and within 0..=100",
                        overlay.vertical_min, overlay.vertical_max
                    ),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        SceneConfig::hero().validate().unwrap();
        SceneConfig::net().validate().unwrap();
    }

    #[test]
    fn hero_constants() {
        let c = SceneConfig::hero();
        assert_eq!(c.particles.count, 25);
        assert_eq!(c.particles.half_extent, 7.0);
        assert_eq!(c.particles.orbit_radius, 10.25);
        let overlay = c.overlay.unwrap();
        assert_eq!(overlay.period_ms, 7_000);
        assert_eq!(overlay.reveal_delay_ms, 100);
        assert_eq!(overlay.visible_ms, 5_000);
        assert!(!c.camera.zoom_enabled);
    }

    #[test]
    fn net_preset_is_static() {
        let c = SceneConfig::net();
        assert_eq!(c.particles.count, 20);
        assert_eq!(c.particles.half_extent, 1.5);
        assert_eq!(c.particles.motion, ParticleMotion::Static);
        assert_eq!(c.particles.orbit_radius, 0.0);
        assert!(c.particles.connect);
        assert!(c.sphere.is_none());
        assert!(c.camera.auto_rotate);
        assert!(c.lights.point.is_none());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let c = SceneConfig::from_json(r#"{ "seed": 7, "particles": { "count": 10 } }"#).unwrap();
        assert_eq!(c.seed, 7);
        assert_eq!(c.particles.count, 10);
        assert_eq!(c.particles.orbit_radius, 10.25);
        assert!(c.sphere.is_some());
    }

    #[test]
    fn null_disables_optional_parts() {
        let c = SceneConfig::from_json(r#"{ "overlay": null, "chat": null }"#).unwrap();
        assert!(c.overlay.is_none());
        assert!(c.chat.is_none());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = SceneConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_speed_range_rejected() {
        let err = SceneConfig::from_json(
            r#"{ "particles": { "speed_min": 0.3, "speed_max": 0.3 } }"#,
        )
        .unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "particles.speed_min"),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn visible_window_must_fit_period() {
        let mut c = SceneConfig::hero();
        if let Some(overlay) = c.overlay.as_mut() {
            overlay.visible_ms = 6_900;
        }
        assert!(matches!(c.validate(), Err(ConfigError::Invalid { field: "overlay.visible_ms", .. })));
    }

    #[test]
    fn slide_must_finish_before_hide() {
        let mut c = SceneConfig::hero();
        if let Some(overlay) = c.overlay.as_mut() {
            overlay.slide_ms = 5_001;
        }
        assert!(matches!(c.validate(), Err(ConfigError::Invalid { field: "overlay.slide_ms", .. })));

        if let Some(overlay) = c.overlay.as_mut() {
            overlay.slide_ms = 5_000;
        }
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_fixed_dt_rejected() {
        let c = SceneConfig {
            step_mode: StepMode::Fixed { dt: 0.0 },
            ..SceneConfig::hero()
        };
        assert!(c.validate().is_err());
    }
}
