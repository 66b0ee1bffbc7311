//! Seeded simulation RNG.
//!
//! The coordinator itself is fully deterministic; randomness is only used to
//! generate scenarios (spawn layouts, goal choices) and to drive randomized
//! invariant tests.  A fixed seed always reproduces the same run.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{TileCoord, WorldPos, tile_to_world};

/// Simulation-level RNG for scenario generation.
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform tile inside `[0, width) × [0, height)`.
    ///
    /// `width` and `height` must be non-zero.
    pub fn tile_in(&mut self, width: i32, height: i32) -> TileCoord {
        TileCoord::new(self.0.gen_range(0..width), self.0.gen_range(0..height))
    }

    /// Centre of a uniform tile inside `[0, width) × [0, height)`.
    pub fn tile_center_in(&mut self, width: i32, height: i32) -> WorldPos {
        tile_to_world(self.tile_in(width, height))
    }
}
