/// Domain-specific error types for the pricing simulator.
/// A run either computes fully or fails with one of these; there are no
/// partial results and nothing to retry for a pure computation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("simulation cancelled after {completed} of {requested} paths")]
    Cancelled { completed: usize, requested: usize },

    #[error("report error: {0}")]
    Report(String),
}

impl From<csv::Error> for SimulationError {
    fn from(e: csv::Error) -> Self {
        SimulationError::Report(e.to_string())
    }
}

impl From<std::io::Error> for SimulationError {
    fn from(e: std::io::Error) -> Self {
        SimulationError::Report(e.to_string())
    }
}

pub type SimResult<T> = Result<T, SimulationError>;
