//! Seedable pseudo-random source shared by particle generation and the
//! overlay scheduler. Same seed, same scene.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable pseudo-random number generator (ChaCha8).
#[derive(Debug, Clone)]
pub struct SceneRng {
    seed: u64,
    inner: ChaCha8Rng,
}

impl SceneRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent stream for a subsystem, derived from this seed and `salt`.
    pub fn fork(&self, salt: u64) -> SceneRng {
        SceneRng::new(self.seed.wrapping_add(salt))
    }

    /// Uniform in `[lo, hi)`. Returns `lo` for an empty range.
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        if lo < hi {
            self.inner.gen_range(lo..hi)
        } else {
            lo
        }
    }

    /// Uniform in `[lo, hi]`. Returns `lo` when `hi < lo`.
    pub fn range_inclusive_f64(&mut self, lo: f64, hi: f64) -> f64 {
        if lo <= hi {
            self.inner.gen_range(lo..=hi)
        } else {
            lo
        }
    }

    /// Uniform integer in `[lo, hi)`. Returns `lo` for an empty range.
    pub fn range_u32(&mut self, lo: u32, hi: u32) -> u32 {
        if lo < hi {
            self.inner.gen_range(lo..hi)
        } else {
            lo
        }
    }

    /// Fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut a = SceneRng::new(42);
        let mut b = SceneRng::new(42);
        for _ in 0..10 {
            assert_eq!(a.range_u32(0, 1000), b.range_u32(0, 1000));
        }
    }

    #[test]
    fn forks_diverge() {
        let root = SceneRng::new(42);
        let mut a = root.fork(1);
        let mut b = root.fork(2);
        let xs: Vec<u32> = (0..8).map(|_| a.range_u32(0, 1_000_000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.range_u32(0, 1_000_000)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn empty_ranges_return_low_bound() {
        let mut rng = SceneRng::new(7);
        assert_eq!(rng.range_f64(1.0, 1.0), 1.0);
        assert_eq!(rng.range_u32(5, 5), 5);
        assert_eq!(rng.range_inclusive_f64(0.0, 0.0), 0.0);
    }

    #[test]
    fn half_open_range_excludes_upper() {
        let mut rng = SceneRng::new(3);
        for _ in 0..10_000 {
            let v = rng.range_f64(0.12, 0.28);
            assert!((0.12..0.28).contains(&v), "{}", v);
        }
    }
}
