// src/rng/traits.rs

use std::fmt::Debug;

/// A source of uniform random draws.
///
/// This is the single seam through which all randomness enters the
/// simulator: one operation, one draw in `[0, 1)` per call. Swapping the
/// source swaps the whole run between ambient (non-deterministic) and
/// seeded (reproducible) behavior.
///
/// We require `Debug` so we can print the source state if needed.
/// We require `Send` to allow moving a run onto a worker thread later.
pub trait UniformSource: Debug + Send {
    /// Returns the next uniform draw in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
}

/// A source of standard-normal draws, built on top of a uniform source or
/// a library distribution.
///
/// Each run owns its source instance, so concurrent runs can never
/// interleave draws from a shared generator.
pub trait NormalSource: Debug + Send {
    /// Returns one sample distributed as N(0, 1).
    fn sample(&mut self) -> f64;
}
