//! Particle field: a fixed set of points orbiting their spawn positions.
//!
//! Positions are a pure function of `(base, speed, t)`. Nothing is
//! integrated frame to frame, so any `t` can be sampled in any order.

use glam::DVec3;
use crate::api::config::{ParticleConfig, ParticleMotion};
use crate::systems::rng::SceneRng;

/// Lower bound of the per-particle angular speed (inclusive).
pub const SPEED_MIN: f64 = 0.12;
/// Upper bound of the per-particle angular speed (exclusive).
pub const SPEED_MAX: f64 = 0.28;
/// Orbit radius of the network cloud. Larger than its spawn half-extent
/// of 7, so particles swing well outside the spawn cube.
pub const NETWORK_ORBIT_RADIUS: f64 = 10.25;

/// A point with a fixed spawn position and individual orbital speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    base: DVec3,
    speed: f64,
}

impl Particle {
    pub fn new(base: DVec3, speed: f64) -> Self {
        Self { base, speed }
    }

    pub fn base(&self) -> DVec3 {
        self.base
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Position at elapsed time `t` (seconds) on an orbit of `radius`.
    #[inline]
    pub fn orbit_position(&self, t: f64, radius: f64) -> DVec3 {
        let phase = t * self.speed;
        DVec3::new(
            self.base.x + phase.cos() * radius,
            self.base.y + phase.sin() * radius,
            self.base.z,
        )
    }
}

/// Fixed-size particle collection.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    orbit_radius: f64,
    motion: ParticleMotion,
}

impl ParticleField {
    /// Spawn `n` orbiting particles with base components uniform in
    /// `[-half_extent, half_extent]` and speeds uniform in
    /// `[SPEED_MIN, SPEED_MAX)`. Orbit radius is [`NETWORK_ORBIT_RADIUS`].
    pub fn initialize(n: usize, half_extent: f64, rng: &mut SceneRng) -> Self {
        Self {
            particles: spawn(n, half_extent, SPEED_MIN, SPEED_MAX, rng),
            orbit_radius: NETWORK_ORBIT_RADIUS,
            motion: ParticleMotion::Orbit,
        }
    }

    /// Spawn a field from a config. `Static` motion forces a zero radius.
    pub fn from_config(config: &ParticleConfig, rng: &mut SceneRng) -> Self {
        let orbit_radius = match config.motion {
            ParticleMotion::Orbit => config.orbit_radius,
            ParticleMotion::Static => 0.0,
        };
        Self {
            particles: spawn(
                config.count,
                config.half_extent,
                config.speed_min,
                config.speed_max,
                rng,
            ),
            orbit_radius,
            motion: config.motion,
        }
    }

    /// Build from explicit particles, e.g. for a hand-placed layout.
    pub fn from_particles(particles: Vec<Particle>, orbit_radius: f64, motion: ParticleMotion) -> Self {
        Self {
            particles,
            orbit_radius,
            motion,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn orbit_radius(&self) -> f64 {
        self.orbit_radius
    }

    pub fn motion(&self) -> ParticleMotion {
        self.motion
    }

    /// Current positions at elapsed time `t`.
    pub fn update(&self, t: f64) -> Vec<DVec3> {
        let mut out = Vec::with_capacity(self.particles.len());
        self.update_into(t, &mut out);
        out
    }

    /// Same as [`update`](Self::update) but reuses `out`.
    pub fn update_into(&self, t: f64, out: &mut Vec<DVec3>) {
        out.clear();
        match self.motion {
            ParticleMotion::Orbit => {
                out.extend(self.particles.iter().map(|p| p.orbit_position(t, self.orbit_radius)));
            }
            ParticleMotion::Static => {
                out.extend(self.particles.iter().map(|p| p.base));
            }
        }
    }

    /// Vertices of the line joining the particles in generation order.
    pub fn polyline(&self) -> Vec<DVec3> {
        self.particles.iter().map(|p| p.base).collect()
    }
}

fn spawn(n: usize, half_extent: f64, speed_min: f64, speed_max: f64, rng: &mut SceneRng) -> Vec<Particle> {
    (0..n)
        .map(|_| {
            let base = DVec3::new(
                rng.range_inclusive_f64(-half_extent, half_extent),
                rng.range_inclusive_f64(-half_extent, half_extent),
                rng.range_inclusive_f64(-half_extent, half_extent),
            );
            let speed = rng.range_f64(speed_min, speed_max);
            Particle::new(base, speed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within_cube(v: DVec3, h: f64) -> bool {
        v.abs().max_element() <= h
    }

    #[test]
    fn initialize_respects_count_extent_and_speed() {
        let mut rng = SceneRng::new(1);
        for &(n, h) in &[(20usize, 1.5f64), (25, 7.0), (1, 0.5), (500, 3.0)] {
            let field = ParticleField::initialize(n, h, &mut rng);
            assert_eq!(field.len(), n);
            for p in field.particles() {
                assert!(within_cube(p.base(), h), "{:?} outside ±{}", p.base(), h);
                assert!((SPEED_MIN..SPEED_MAX).contains(&p.speed()), "speed {}", p.speed());
            }
        }
    }

    #[test]
    fn update_is_pure() {
        let mut rng = SceneRng::new(9);
        let field = ParticleField::initialize(25, 7.0, &mut rng);
        let a = field.update(12.5);
        let _ = field.update(99.0);
        let b = field.update(12.5);
        assert_eq!(a, b);
    }

    #[test]
    fn orbit_formula() {
        let p = Particle::new(DVec3::new(1.0, 2.0, 3.0), 0.2);
        let field = ParticleField::from_particles(vec![p], NETWORK_ORBIT_RADIUS, ParticleMotion::Orbit);
        let t = 4.0;
        let pos = field.update(t)[0];
        assert_eq!(pos.x, 1.0 + (t * 0.2).cos() * 10.25);
        assert_eq!(pos.y, 2.0 + (t * 0.2).sin() * 10.25);
        assert_eq!(pos.z, 3.0);
    }

    #[test]
    fn at_time_zero_particles_sit_one_radius_along_x() {
        let mut rng = SceneRng::new(5);
        let field = ParticleField::initialize(10, 7.0, &mut rng);
        for (p, pos) in field.particles().iter().zip(field.update(0.0)) {
            assert!((pos.x - (p.base().x + NETWORK_ORBIT_RADIUS)).abs() < 1e-12);
            assert!((pos.y - p.base().y).abs() < 1e-12);
        }
    }

    #[test]
    fn orbit_leaves_spawn_cube() {
        let mut rng = SceneRng::new(11);
        let field = ParticleField::initialize(25, 7.0, &mut rng);
        let escaped = field
            .update(0.0)
            .iter()
            .any(|pos| !within_cube(*pos, 7.0));
        assert!(escaped, "10.25 orbit radius should carry particles outside ±7");
    }

    #[test]
    fn static_field_never_moves() {
        let mut rng = SceneRng::new(2);
        let field = ParticleField::from_config(&ParticleConfig::net(), &mut rng);
        assert_eq!(field.len(), 20);
        assert_eq!(field.orbit_radius(), 0.0);
        let bases = field.polyline();
        assert_eq!(field.update(0.0), bases);
        assert_eq!(field.update(1234.5), bases);
    }

    #[test]
    fn update_into_reuses_buffer() {
        let mut rng = SceneRng::new(3);
        let field = ParticleField::initialize(25, 7.0, &mut rng);
        let mut out = vec![DVec3::ZERO; 100];
        field.update_into(1.0, &mut out);
        assert_eq!(out.len(), 25);
        assert_eq!(out, field.update(1.0));
    }

    #[test]
    fn same_seed_same_field() {
        let a = ParticleField::initialize(25, 7.0, &mut SceneRng::new(77));
        let b = ParticleField::initialize(25, 7.0, &mut SceneRng::new(77));
        assert_eq!(a.particles(), b.particles());
    }
}
