pub mod camera;
pub mod instance;

pub use camera::{CameraRig, CameraUniform};
pub use instance::{DrawBuffer, NodeInstance, FLAG_WIREFRAME};
