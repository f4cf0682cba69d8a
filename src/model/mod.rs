pub mod gbm;
pub mod payoff;
