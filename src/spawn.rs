//! Spawn helpers for point initialization.
//!
//! Wraps an RNG with the handful of draws the fields need, so spawning a
//! point set reads as intent rather than RNG plumbing:
//!
//! ```ignore
//! let mut ctx = SpawnContext::new(i, count);
//! let position = ctx.random_in_rect(width, height);
//! let velocity = ctx.drift_velocity(0.5);
//! let color = *ctx.pick(&config.palette);
//! ```

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Context for spawning one point.
pub struct SpawnContext {
    /// Index of the point being spawned (0 to count-1).
    pub index: usize,
    /// Total number of points being spawned.
    pub count: usize,
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a spawn context for a point.
    pub fn new(index: usize, count: usize) -> Self {
        // Seed based on index for variety within a set, but different each
        // program execution.
        let seed = index as u64
            ^ (std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42));

        Self {
            index,
            count,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given inclusive range. `min == max` is allowed.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..=max)
    }

    /// Uniform random position inside a `width` x `height` rectangle
    /// anchored at the origin.
    pub fn random_in_rect(&mut self, width: f32, height: f32) -> Vec2 {
        Vec2::new(
            self.rng.gen_range(0.0..=width),
            self.rng.gen_range(0.0..=height),
        )
    }

    /// Random drift velocity with each axis in `-speed / 2 .. speed / 2`.
    pub fn drift_velocity(&mut self, speed: f32) -> Vec2 {
        Vec2::new(
            (self.rng.gen::<f32>() - 0.5) * speed,
            (self.rng.gen::<f32>() - 0.5) * speed,
        )
    }

    /// Pick a uniformly random element from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.gen_range(0..items.len())]
    }
}
