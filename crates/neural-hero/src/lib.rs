pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;

/// Outbound link behind the "book a call" button.
pub const BOOKING_URL: &str = "https://calendly.com/rasoolkhan990880/30min";

// Re-export key types at crate root for convenience
pub use api::config::{
    CameraConfig, ChatConfig, LightConfig, OverlayConfig, ParticleConfig, ParticleMotion,
    PointLightConfig, SceneConfig, SphereConfig,
};
pub use api::error::ConfigError;
pub use api::hero::HeroScene;
pub use api::types::{Lifecycle, NodeId, Side};
pub use components::mesh::{Color, Geometry, Material};
pub use components::node::{NodeKind, SceneNode, Transform};
pub use core::scene::Scene;
pub use core::time::{Clock, FixedTimestep, FrameDriver, StepMode};
pub use core::timer::{TimerId, TimerService};
pub use input::pointer::{PointerSampler, PointerState};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::CameraRig;
pub use renderer::instance::{DrawBuffer, NodeInstance};
pub use bridge::protocol::ProtocolLayout;
pub use systems::chat::ChatWidget;
pub use systems::compose::{DrawItem, SceneComposer};
pub use systems::lighting::{AmbientLight, LightState, PointLight};
pub use systems::overlay::{OverlayPhase, OverlayScheduler, OverlaySnapshot, OverlayState};
pub use systems::particles::{Particle, ParticleField};
pub use systems::rng::SceneRng;
pub use systems::sphere::{SphereController, SphereState};
pub use extensions::{Easing, lerp, ease};
