// extensions/mod.rs
//
// Optional helpers that sit beside the core systems.

pub mod easing;

pub use easing::{Easing, lerp, ease};
