// src/model/gbm.rs

/// Market parameters for a European call under geometric Brownian motion.
///
/// Terminal prices are log-normally distributed: the estimator only ever
/// needs the exact one-step solution at the horizon, never a full path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketParams {
    /// Initial (spot) price of the underlying.
    pub s0: f64,
    /// Strike price.
    pub k: f64,
    /// Time to expiry, in years.
    pub t: f64,
    /// Continuously compounded risk-free rate.
    pub r: f64,
    /// Annualized volatility.
    pub sigma: f64,
}

impl MarketParams {
    pub fn new(s0: f64, k: f64, t: f64, r: f64, sigma: f64) -> Self {
        Self { s0, k, t, r, sigma }
    }

    /// All five parameters are finite.
    ///
    /// This is the only constraint the simulator enforces. Negative
    /// volatility, negative prices, or a zero horizon pass through and
    /// produce whatever the formula produces.
    pub fn is_finite(&self) -> bool {
        self.s0.is_finite()
            && self.k.is_finite()
            && self.t.is_finite()
            && self.r.is_finite()
            && self.sigma.is_finite()
    }

    /// Exact GBM terminal price for one standard-normal draw `z`.
    ///
    /// S_T = S_0 * exp((r - sigma^2/2) * T + sigma * sqrt(T) * z)
    pub fn terminal_price(&self, z: f64) -> f64 {
        let drift = (self.r - 0.5 * self.sigma * self.sigma) * self.t;
        let diffusion = self.sigma * self.t.sqrt();
        self.s0 * (drift + diffusion * z).exp()
    }

    /// Discount factor back from expiry: exp(-r * T).
    pub fn discount_factor(&self) -> f64 {
        (-self.r * self.t).exp()
    }
}

impl Default for MarketParams {
    fn default() -> Self {
        Self {
            s0: 100.0,
            k: 100.0,
            t: 1.0,
            r: 0.05,
            sigma: 0.2,
        }
    }
}
