// src/rng/implementations.rs

use crate::rng::traits::{NormalSource, UniformSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use std::f64::consts::PI;

// =========================================================================
// 1. Uniform Sources
// =========================================================================

/// The ambient thread-local generator. Non-deterministic: this preserves
/// the unseeded behavior a run gets when no seed is configured.
#[derive(Debug, Clone)]
pub struct ThreadSource;

impl ThreadSource {
    pub fn new() -> Self {
        Self
    }
}

impl UniformSource for ThreadSource {
    fn next_uniform(&mut self) -> f64 {
        // thread_rng() hands back a cheap handle to the thread-local RNG,
        // so we fetch it per draw rather than hold the (!Send) handle.
        rand::thread_rng().gen::<f64>()
    }
}

/// A deterministic source seeded from a `u64`. Two sources built from the
/// same seed produce identical draw sequences.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl UniformSource for SeededSource {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Picks the uniform source for a run: seeded when a seed is configured,
/// ambient otherwise.
pub fn uniform_for(seed: Option<u64>) -> Box<dyn UniformSource> {
    match seed {
        Some(s) => Box::new(SeededSource::new(s)),
        None => Box::new(ThreadSource::new()),
    }
}

// =========================================================================
// 2. Normal Samplers
// =========================================================================

/// Which standard-normal sampler the engine runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplerKind {
    /// Box–Muller over the injected uniform source (the default).
    #[default]
    BoxMuller,
    /// `rand_distr`'s ziggurat sampler, as a cross-check alternative.
    Ziggurat,
}

/// Box–Muller transform over an injected uniform source.
///
/// Draws `u` and `v` uniformly, re-drawing each until strictly nonzero to
/// avoid the `ln(0)` singularity, then returns
/// `sqrt(-2 ln u) * cos(2 pi v)`. Only one of the Box–Muller pair is used
/// per call.
#[derive(Debug)]
pub struct BoxMullerSampler {
    source: Box<dyn UniformSource>,
}

impl BoxMullerSampler {
    pub fn new(source: Box<dyn UniformSource>) -> Self {
        Self { source }
    }

    fn next_nonzero(&mut self) -> f64 {
        let mut x = self.source.next_uniform();
        while x <= 0.0 {
            x = self.source.next_uniform();
        }
        x
    }
}

impl NormalSource for BoxMullerSampler {
    fn sample(&mut self) -> f64 {
        let u = self.next_nonzero();
        let v = self.next_nonzero();
        (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
    }
}

/// Ziggurat sampler backed by `rand_distr::StandardNormal`.
#[derive(Debug)]
pub struct ZigguratSampler {
    rng: StdRng,
}

impl ZigguratSampler {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl NormalSource for ZigguratSampler {
    fn sample(&mut self) -> f64 {
        StandardNormal.sample(&mut self.rng)
    }
}

/// Builds the normal source for a run from the configured kind and seed.
pub fn normal_source(kind: SamplerKind, seed: Option<u64>) -> Box<dyn NormalSource> {
    match kind {
        SamplerKind::BoxMuller => Box::new(BoxMullerSampler::new(uniform_for(seed))),
        SamplerKind::Ziggurat => Box::new(ZigguratSampler::new(seed)),
    }
}
