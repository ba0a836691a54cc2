use serde::{Deserialize, Serialize};

/// Unique identifier for a node registered in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Screen edge the overlay slides in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    /// Horizontal sign of the off-screen slide offset: left enters from
    /// negative x, right from positive x.
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// Wire value for the host (0 = left, 1 = right).
    pub fn as_u32(self) -> u32 {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Lifecycle of a mounted component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Constructed but not yet attached to the host.
    #[default]
    Created,
    /// Attached; updates run.
    Mounted,
    /// Detached; timers cancelled and updates are no-ops.
    TornDown,
}
