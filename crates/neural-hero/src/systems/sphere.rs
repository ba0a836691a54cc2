//! Floating, slowly spinning sphere.
//!
//! Rotation advances by a fixed amount per update pass, not per second, so
//! spin speed follows the host's frame rate. Use
//! [`StepMode::Fixed`](crate::core::time::StepMode) for frame-rate
//! independent cadence.

use glam::DVec3;
use crate::api::config::SphereConfig;
use crate::api::types::NodeId;
use crate::components::node::Transform;
use crate::input::pointer::PointerState;

/// Rotation and position of the sphere.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SphereState {
    /// Euler rotation in radians. Unbounded; never wrapped.
    pub rotation: DVec3,
    pub position: DVec3,
}

impl SphereState {
    /// Next state after one update pass at elapsed time `t`.
    ///
    /// Additions happen in the same order as the page's frame callback
    /// (base spin, float, then pointer nudge) so results match it bit for bit.
    pub fn update(self, config: &SphereConfig, pointer: PointerState, t: f64) -> SphereState {
        let mut rotation = self.rotation;
        let mut position = self.position;

        rotation.y += config.yaw_step;
        rotation.x += config.pitch_step;

        position.y = t.sin() * config.bob_amplitude;
        position.x = (t * config.sway_frequency).cos() * config.sway_amplitude;

        rotation.y += pointer.x * config.pointer_gain;
        rotation.x += pointer.y * config.pointer_gain;

        SphereState { rotation, position }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
        }
    }
}

/// Owns the sphere state and the node it drives.
#[derive(Debug, Clone)]
pub struct SphereController {
    config: SphereConfig,
    state: SphereState,
    node: Option<NodeId>,
}

impl SphereController {
    pub fn new(config: SphereConfig) -> Self {
        Self {
            config,
            state: SphereState::default(),
            node: None,
        }
    }

    pub fn config(&self) -> &SphereConfig {
        &self.config
    }

    pub fn state(&self) -> SphereState {
        self.state
    }

    /// Node receiving the transform, once mounted.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn attach(&mut self, node: NodeId) {
        self.node = Some(node);
    }

    /// Release the node registration. Returns the node that was attached.
    pub fn detach(&mut self) -> Option<NodeId> {
        self.node.take()
    }

    /// Run one update pass and return the new state.
    pub fn update(&mut self, pointer: PointerState, t: f64) -> SphereState {
        self.state = self.state.update(&self.config, pointer, t);
        self.state
    }
}
