// src/simulation/engine.rs

use crate::errors::{SimResult, SimulationError};
use crate::model::payoff::european_call;
use crate::rng::implementations::{normal_source, SamplerKind};
use crate::simulation::config::SimulationConfig;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

// We make this Serialize so we can write it to CSV later
#[derive(Debug, Clone, Serialize)]
pub struct ConvergenceRecord {
    pub checkpoint: usize,
    pub paths: usize,
    pub estimate: f64,
    pub std_error: f64,
}

/// The outcome of one simulation run. Transient: produced fresh per run,
/// held for display, never persisted.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Discounted sample mean of the call payoff.
    pub price: f64,
    /// Sample standard error of the discounted estimate.
    pub std_error: f64,
    /// Paths actually averaged.
    pub iterations: usize,
    /// True when finite inputs still produced a non-finite estimate.
    /// Flagged rather than hidden so a caller never renders NaN as a price.
    pub degenerate: bool,
    /// Human-readable one-liner with the price to 6 decimal places.
    pub summary: String,
}

/// Cooperative cancellation handle. Clone it, hand one side to the run,
/// flip the other from wherever the abort decision lives.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

pub struct PricingSimulation {
    config: SimulationConfig,
    sampler_kind: SamplerKind,

    // Running estimate at each checkpoint, cleared and refilled per run.
    pub history: Vec<ConvergenceRecord>,
}

impl PricingSimulation {
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sampler_kind: SamplerKind::default(),
            history: Vec::new(),
        })
    }

    /// Swaps the standard-normal sampler the run is driven by.
    pub fn with_sampler(mut self, kind: SamplerKind) -> Self {
        self.sampler_kind = kind;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn run(&mut self) -> SimResult<SimulationResult> {
        self.run_with_cancel(&CancelToken::new())
    }

    /// Runs the full Monte Carlo loop.
    ///
    /// Taking `&mut self` serializes runs structurally: a second run cannot
    /// start while one has the engine borrowed. The sampler is rebuilt per
    /// run, so a fixed seed reproduces the same estimate on every call and
    /// concurrent engines never share a draw stream.
    pub fn run_with_cancel(&mut self, cancel: &CancelToken) -> SimResult<SimulationResult> {
        self.config.validate()?;
        self.history.clear();

        let params = self.config.params;
        let iterations = self.config.iterations;
        let discount = params.discount_factor();
        let mut sampler = normal_source(self.sampler_kind, self.config.seed);

        // Checkpoint cadence; a trailing partial batch still gets a record.
        let batch = (iterations / self.config.checkpoints).max(1);

        let mut sum = 0.0_f64;
        let mut sum_sq = 0.0_f64;
        let mut completed = 0_usize;
        let mut checkpoint = 0_usize;

        while completed < iterations {
            if cancel.is_cancelled() {
                return Err(SimulationError::Cancelled {
                    completed,
                    requested: iterations,
                });
            }

            let quota = batch.min(iterations - completed);
            for _ in 0..quota {
                let z = sampler.sample();
                let terminal = params.terminal_price(z);
                let payoff = european_call(terminal, params.k);
                sum += payoff;
                sum_sq += payoff * payoff;
            }
            completed += quota;
            checkpoint += 1;

            let (estimate, std_error) = discounted_stats(discount, sum, sum_sq, completed);
            debug!(checkpoint, paths = completed, estimate, "convergence checkpoint");
            self.history.push(ConvergenceRecord {
                checkpoint,
                paths: completed,
                estimate,
                std_error,
            });
        }

        let (price, std_error) = discounted_stats(discount, sum, sum_sq, completed);
        let degenerate = !price.is_finite() || !std_error.is_finite();
        if degenerate {
            warn!(price, std_error, "estimate degenerated to a non-finite value");
        }

        let summary = format!(
            "Estimated European call price: {price:.6} ({completed} paths, std error {std_error:.6})"
        );

        Ok(SimulationResult {
            price,
            std_error,
            iterations: completed,
            degenerate,
            summary,
        })
    }

    /// The most recent running estimate, if a run has progressed at all.
    pub fn latest_estimate(&self) -> Option<f64> {
        self.history.last().map(|record| record.estimate)
    }
}

/// Discounted mean and standard error from the running payoff sums.
fn discounted_stats(discount: f64, sum: f64, sum_sq: f64, n: usize) -> (f64, f64) {
    let n = n as f64;
    let mean = sum / n;
    let var = if n > 1.0 {
        // Clamped at zero: identical payoffs can cancel to a tiny negative.
        ((sum_sq - sum * sum / n) / (n - 1.0)).max(0.0)
    } else {
        0.0
    };
    (discount * mean, discount * (var / n).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::gbm::MarketParams;

    fn config(iterations: usize, seed: u64, params: MarketParams) -> SimulationConfig {
        SimulationConfig {
            iterations,
            seed: Some(seed),
            params,
            checkpoints: 20,
        }
    }

    #[test]
    fn zero_iterations_fail_fast() {
        let bad = SimulationConfig {
            iterations: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            PricingSimulation::new(bad),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn at_the_money_run_converges_to_black_scholes() {
        // Closed-form Black-Scholes price for s0=k=100, t=1, r=0, sigma=0.2
        let reference = 7.9656;
        let params = MarketParams::new(100.0, 100.0, 1.0, 0.0, 0.2);
        let mut sim = PricingSimulation::new(config(1_000_000, 42, params)).unwrap();
        let result = sim.run().unwrap();

        assert!(!result.degenerate);
        assert!(
            (result.price - reference).abs() <= 3.0 * result.std_error + 0.02,
            "price {} strayed from reference {reference} (std error {})",
            result.price,
            result.std_error
        );
    }

    #[test]
    fn price_increases_with_spot() {
        // Same seed means the same normal stream, and the call payoff is
        // pathwise nondecreasing in the spot, so the ordering is strict.
        let mut prices = Vec::new();
        for s0 in [90.0, 100.0, 110.0] {
            let params = MarketParams::new(s0, 100.0, 1.0, 0.0, 0.2);
            let mut sim = PricingSimulation::new(config(200_000, 7, params)).unwrap();
            prices.push(sim.run().unwrap().price);
        }
        assert!(prices[0] < prices[1] && prices[1] < prices[2], "{prices:?}");
    }

    #[test]
    fn far_out_of_the_money_strike_prices_near_zero() {
        // k = 10 * s0 * exp(5 * sigma * sqrt(t)), unreachable in practice
        let strike = 10.0 * 100.0 * (5.0 * 0.2_f64).exp();
        let params = MarketParams::new(100.0, strike, 1.0, 0.0, 0.2);
        let mut sim = PricingSimulation::new(config(50_000, 3, params)).unwrap();
        let result = sim.run().unwrap();
        assert!(result.price < 1e-6, "price {} should vanish", result.price);
    }

    #[test]
    fn zero_volatility_collapses_to_deterministic_payoff() {
        let params = MarketParams::new(100.0, 90.0, 1.0, 0.05, 0.0);
        let expected = (-0.05_f64).exp() * (100.0 * (0.05_f64).exp() - 90.0);

        let mut sim = PricingSimulation::new(config(10_000, 1, params)).unwrap();
        let result = sim.run().unwrap();

        assert!(!result.degenerate);
        assert!((result.price - expected).abs() < 1e-9);
        // Every payoff is identical, so the estimator has no variance
        // beyond accumulation rounding.
        assert!(result.std_error < 1e-6);
    }

    #[test]
    fn same_seed_reproduces_the_same_price() {
        let params = MarketParams::new(100.0, 105.0, 0.5, 0.02, 0.3);
        let mut a = PricingSimulation::new(config(20_000, 11, params)).unwrap();
        let mut b = PricingSimulation::new(config(20_000, 11, params)).unwrap();
        assert_eq!(a.run().unwrap().price, b.run().unwrap().price);
    }

    #[test]
    fn rerunning_one_engine_is_also_reproducible() {
        let params = MarketParams::default();
        let mut sim = PricingSimulation::new(config(5_000, 23, params)).unwrap();
        let first = sim.run().unwrap().price;
        let second = sim.run().unwrap().price;
        assert_eq!(first, second);
    }

    #[test]
    fn ziggurat_sampler_agrees_with_box_muller() {
        let params = MarketParams::new(100.0, 100.0, 1.0, 0.0, 0.2);
        let mut bm = PricingSimulation::new(config(200_000, 5, params)).unwrap();
        let mut zg = PricingSimulation::new(config(200_000, 5, params))
            .unwrap()
            .with_sampler(SamplerKind::Ziggurat);
        let a = bm.run().unwrap();
        let b = zg.run().unwrap();
        // Different draw streams, same distribution: estimates should sit
        // within joint sampling error of each other.
        let tolerance = 3.0 * (a.std_error + b.std_error) + 0.02;
        assert!((a.price - b.price).abs() <= tolerance);
    }

    #[test]
    fn pre_cancelled_token_aborts_before_any_work() {
        let mut sim = PricingSimulation::new(config(50_000, 9, MarketParams::default())).unwrap();
        let token = CancelToken::new();
        token.cancel();
        match sim.run_with_cancel(&token) {
            Err(SimulationError::Cancelled {
                completed,
                requested,
            }) => {
                assert_eq!(completed, 0);
                assert_eq!(requested, 50_000);
            }
            other => panic!("expected Cancelled, got {other:?}"),
        }
    }

    #[test]
    fn history_covers_the_whole_run() {
        let mut config = config(1_003, 2, MarketParams::default());
        config.checkpoints = 20;
        let mut sim = PricingSimulation::new(config).unwrap();
        let result = sim.run().unwrap();

        assert!(sim.history.len() >= 20);
        let last = sim.history.last().unwrap();
        assert_eq!(last.paths, 1_003);
        assert_eq!(sim.latest_estimate(), Some(result.price));
    }

    #[test]
    fn summary_embeds_the_price_to_six_decimals() {
        let mut sim = PricingSimulation::new(config(1_000, 4, MarketParams::default())).unwrap();
        let result = sim.run().unwrap();
        assert!(result.summary.contains(&format!("{:.6}", result.price)));
    }

    #[test]
    fn non_finite_payoffs_flag_the_result_as_degenerate() {
        // Finite inputs whose payoff overflows: spot at the f64 ceiling
        // against a deeply negative strike.
        let params = MarketParams::new(1e308, -1e308, 1.0, 0.0, 0.0);
        let mut sim = PricingSimulation::new(config(100, 8, params)).unwrap();
        let result = sim.run().unwrap();
        assert!(result.degenerate);
    }
}
