//! Option Greeks value object.

use serde::{Deserialize, Serialize};

/// Sensitivity measures supplied by the upstream market-data provider.
///
/// Missing values are normalized to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OptionGreeks {
    /// Delta - price sensitivity to the underlying.
    pub delta: f64,
    /// Gamma - rate of change of delta.
    pub gamma: f64,
    /// Theta - time decay per day.
    pub theta: f64,
    /// Vega - sensitivity to volatility.
    pub vega: f64,
    /// Implied volatility (annualized, as a fraction).
    pub implied_volatility: f64,
}

impl OptionGreeks {
    /// Create Greeks with just delta.
    #[must_use]
    pub fn with_delta(delta: f64) -> Self {
        Self {
            delta,
            ..Default::default()
        }
    }

    /// Absolute delta, the quantity strategies target.
    #[must_use]
    pub fn abs_delta(&self) -> f64 {
        self.delta.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_delta_defaults_others() {
        let greeks = OptionGreeks::with_delta(-0.42);
        assert_eq!(greeks.delta, -0.42);
        assert_eq!(greeks.gamma, 0.0);
        assert_eq!(greeks.abs_delta(), 0.42);
    }
}
