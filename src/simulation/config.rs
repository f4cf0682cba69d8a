// src/simulation/config.rs

use crate::errors::{SimResult, SimulationError};
use crate::model::gbm::MarketParams;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of Monte Carlo paths. Must be at least 1.
    pub iterations: usize,
    /// `Some(seed)` gives a deterministic run; `None` uses the ambient
    /// thread-local generator.
    pub seed: Option<u64>,
    /// Market parameters of the option being priced.
    pub params: MarketParams,
    /// How many convergence-trace records the engine emits over a run.
    pub checkpoints: usize,
}

impl SimulationConfig {
    /// Fail-fast validation, run before any sampling starts.
    ///
    /// Only structural problems are rejected: a zero path count would
    /// divide by zero, a non-finite parameter poisons every trial. Odd but
    /// finite values (negative volatility, negative prices) pass through.
    pub fn validate(&self) -> SimResult<()> {
        if self.iterations < 1 {
            return Err(SimulationError::InvalidConfiguration(
                "iterations must be at least 1".to_string(),
            ));
        }
        if self.checkpoints < 1 {
            return Err(SimulationError::InvalidConfiguration(
                "checkpoints must be at least 1".to_string(),
            ));
        }
        if !self.params.is_finite() {
            return Err(SimulationError::InvalidConfiguration(format!(
                "market parameters must be finite: {:?}",
                self.params
            )));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: 50_000,
            seed: None,
            params: MarketParams::default(),
            checkpoints: 20,
        }
    }
}
