//! Base Scorer
//!
//! Deterministic weighted score for a single contract. Four components,
//! each saturating at its configured weight:
//!
//! - Liquidity: half volume, half open interest, each linear up to its
//!   saturation point
//! - Spread: linear from full weight at 0% down to zero at the maximum spread
//! - Time fit: triangle peaking at the target DTE
//! - Delta fit: triangle peaking at the target absolute delta
//!
//! The arithmetic is plain f64 in a fixed order with no clock or randomness,
//! so identical inputs always produce bit-identical scores.

use chrono::NaiveDate;

use crate::domain::option_chain::NormalizedContract;
use crate::domain::recommendation::value_objects::{
    RiskTolerance, ScoreBreakdown, ScoredCandidate, ScoringParameters, StrategyPreference,
    TargetProfile,
};

/// Scores contracts against a preference's targets.
#[derive(Debug, Clone, Default)]
pub struct BaseScorer {
    params: ScoringParameters,
}

impl BaseScorer {
    /// Create a scorer with the given parameters.
    #[must_use]
    pub const fn new(params: ScoringParameters) -> Self {
        Self { params }
    }

    /// Scoring parameters in use.
    #[must_use]
    pub const fn params(&self) -> &ScoringParameters {
        &self.params
    }

    /// Score one contract.
    #[must_use]
    pub fn score(
        &self,
        contract: NormalizedContract,
        as_of: NaiveDate,
        preference: StrategyPreference,
        risk: RiskTolerance,
    ) -> ScoredCandidate {
        let targets = self.params.targets(preference, risk);
        let days_to_expiration = contract.days_to_expiration(as_of);
        let breakdown = self.breakdown(&contract, days_to_expiration, targets);

        ScoredCandidate {
            contract,
            base_score: breakdown.total,
            category: self.params.categorize(breakdown.total),
            days_to_expiration,
            breakdown,
        }
    }

    /// Score every contract, preserving input order.
    #[must_use]
    pub fn score_all(
        &self,
        contracts: Vec<NormalizedContract>,
        as_of: NaiveDate,
        preference: StrategyPreference,
        risk: RiskTolerance,
    ) -> Vec<ScoredCandidate> {
        contracts
            .into_iter()
            .map(|contract| self.score(contract, as_of, preference, risk))
            .collect()
    }

    /// Component breakdown for a contract at a given DTE.
    #[must_use]
    pub fn breakdown(
        &self,
        contract: &NormalizedContract,
        days_to_expiration: i64,
        targets: TargetProfile,
    ) -> ScoreBreakdown {
        let p = &self.params;

        let half_liquidity = p.liquidity_weight / 2.0;
        let liquidity = half_liquidity * saturate(contract.volume as f64, p.volume_saturation)
            + half_liquidity * saturate(contract.open_interest as f64, p.open_interest_saturation);

        let spread = p.spread_weight * decay(contract.spread_percent, p.max_spread_percent);

        let time_fit = p.time_weight
            * decay(
                (days_to_expiration as f64 - targets.dte).abs(),
                p.dte_window,
            );

        let delta_fit = p.delta_weight
            * decay(
                (contract.greeks.abs_delta() - targets.delta).abs(),
                p.delta_window,
            );

        let total = (liquidity + spread + time_fit + delta_fit).clamp(0.0, 1.0);

        ScoreBreakdown {
            liquidity,
            spread,
            time_fit,
            delta_fit,
            total,
        }
    }
}

/// `min(value / limit, 1)`, zero for a non-positive limit.
fn saturate(value: f64, limit: f64) -> f64 {
    if limit <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / limit).clamp(0.0, 1.0)
}

/// `max(0, 1 - distance / window)`, zero for a non-positive window.
fn decay(distance: f64, window: f64) -> f64 {
    if window <= 0.0 || !distance.is_finite() {
        return 0.0;
    }
    (1.0 - distance / window).max(0.0)
}
