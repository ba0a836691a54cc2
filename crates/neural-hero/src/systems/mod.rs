pub mod chat;
pub mod compose;
pub mod lighting;
pub mod overlay;
pub mod particles;
pub mod rng;
pub mod sphere;
