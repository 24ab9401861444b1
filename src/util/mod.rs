//! Various utility functions.
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro64StarStar;

pub mod board_gen;
pub mod game_stats;
pub mod internal_ext;

/// A fast rng with a fixed seed, for reproducible tests and benchmarks.
pub fn consistent_rng() -> impl Rng {
    Xoroshiro64StarStar::seed_from_u64(0)
}
