// src/model/payoff.rs

/// European call payoff at expiry: max(S_T - K, 0).
///
/// Realizable only at the fixed expiry time, so the estimator evaluates it
/// once per path on the terminal price.
pub fn european_call(terminal: f64, strike: f64) -> f64 {
    (terminal - strike).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_the_money_pays_intrinsic_value() {
        assert!((european_call(110.0, 100.0) - 10.0).abs() < 1e-15);
    }

    #[test]
    fn out_of_the_money_pays_zero() {
        assert_eq!(european_call(90.0, 100.0), 0.0);
        assert_eq!(european_call(100.0, 100.0), 0.0);
    }
}
