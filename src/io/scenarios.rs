// src/io/scenarios.rs

use crate::model::gbm::MarketParams;
use crate::simulation::config::SimulationConfig;

/// The textbook at-the-money benchmark: s0 = k = 100, one year, zero rate,
/// 20% volatility. Closed-form Black-Scholes value is about 7.9656, which
/// makes this the scenario to eyeball for convergence.
pub fn at_the_money(iterations: usize, seed: Option<u64>) -> SimulationConfig {
    SimulationConfig {
        iterations,
        seed,
        params: MarketParams::new(100.0, 100.0, 1.0, 0.0, 0.2),
        ..SimulationConfig::default()
    }
}

/// A strike ten times further out than five volatilities can plausibly
/// carry the terminal price. The expected payoff is effectively zero, so
/// the estimate should vanish. Useful as a boundary sanity check.
pub fn deep_out_of_the_money(iterations: usize, seed: Option<u64>) -> SimulationConfig {
    let s0: f64 = 100.0;
    let t: f64 = 1.0;
    let sigma: f64 = 0.2;
    let strike = 10.0 * s0 * (5.0 * sigma * t.sqrt()).exp();
    SimulationConfig {
        iterations,
        seed,
        params: MarketParams::new(s0, strike, t, 0.0, sigma),
        ..SimulationConfig::default()
    }
}

/// Zero volatility collapses the model to a deterministic terminal price,
/// so every path pays the same and the estimator has zero variance.
/// Useful for testing the degenerate limit of the model.
pub fn zero_volatility(iterations: usize, seed: Option<u64>) -> SimulationConfig {
    SimulationConfig {
        iterations,
        seed,
        params: MarketParams::new(100.0, 90.0, 1.0, 0.05, 0.0),
        ..SimulationConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        assert!(at_the_money(1_000, None).validate().is_ok());
        assert!(deep_out_of_the_money(1_000, Some(1)).validate().is_ok());
        assert!(zero_volatility(1_000, Some(1)).validate().is_ok());
    }

    #[test]
    fn deep_otm_strike_is_far_above_spot() {
        let config = deep_out_of_the_money(1_000, None);
        assert!(config.params.k > 20.0 * config.params.s0);
    }
}
