//! Scoring Parameters Value Object
//!
//! Weights, saturation points and per-preference targets for the base
//! scorer. The defaults are hand-tuned heuristics pending product-owner
//! confirmation; they are configuration, not derived values.

use serde::{Deserialize, Serialize};

use super::{Category, RiskTolerance, StrategyPreference};

/// Target DTE and absolute delta for a preference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetProfile {
    /// Target days to expiration.
    pub dte: f64,
    /// Target absolute delta.
    pub delta: f64,
}

/// Growth targets; DTE scales with risk tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthProfile {
    /// Target DTE at low risk tolerance.
    pub min_dte: f64,
    /// Target DTE at high risk tolerance.
    pub max_dte: f64,
    /// Target absolute delta.
    pub delta: f64,
}

impl GrowthProfile {
    /// Resolve targets for a risk tolerance.
    #[must_use]
    pub fn at(&self, risk: RiskTolerance) -> TargetProfile {
        self.scaled(risk.growth_factor())
    }

    fn scaled(&self, factor: f64) -> TargetProfile {
        TargetProfile {
            dte: (self.max_dte - self.min_dte).mul_add(factor, self.min_dte),
            delta: self.delta,
        }
    }
}

/// Base scoring parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParameters {
    /// Maximum liquidity component.
    pub liquidity_weight: f64,
    /// Volume at which the volume half saturates.
    pub volume_saturation: f64,
    /// Open interest at which the OI half saturates.
    pub open_interest_saturation: f64,
    /// Maximum spread component.
    pub spread_weight: f64,
    /// Spread percent at which the spread component reaches zero.
    pub max_spread_percent: f64,
    /// Maximum time-fit component.
    pub time_weight: f64,
    /// Half-width of the time-fit triangle, in days.
    pub dte_window: f64,
    /// Maximum delta-fit component.
    pub delta_weight: f64,
    /// Half-width of the delta-fit triangle.
    pub delta_window: f64,
    /// Income targets (also used for conservative).
    pub income: TargetProfile,
    /// Balanced targets.
    pub balanced: TargetProfile,
    /// Growth targets (aggressive uses the top of the range).
    pub growth: GrowthProfile,
    /// Minimum score for `Aggressive`.
    pub aggressive_threshold: f64,
    /// Minimum score for `Balanced`.
    pub balanced_threshold: f64,
}

impl Default for ScoringParameters {
    fn default() -> Self {
        Self {
            liquidity_weight: 0.30,
            volume_saturation: 100.0,
            open_interest_saturation: 500.0,
            spread_weight: 0.20,
            max_spread_percent: 10.0,
            time_weight: 0.20,
            dte_window: 30.0,
            delta_weight: 0.30,
            delta_window: 0.35,
            income: TargetProfile {
                dte: 21.0,
                delta: 0.35,
            },
            balanced: TargetProfile {
                dte: 38.0,
                delta: 0.50,
            },
            growth: GrowthProfile {
                min_dte: 45.0,
                max_dte: 60.0,
                delta: 0.65,
            },
            aggressive_threshold: Category::AGGRESSIVE_THRESHOLD,
            balanced_threshold: Category::BALANCED_THRESHOLD,
        }
    }
}

impl ScoringParameters {
    /// Targets for a preference and risk tolerance.
    #[must_use]
    pub fn targets(&self, preference: StrategyPreference, risk: RiskTolerance) -> TargetProfile {
        match preference {
            StrategyPreference::Income | StrategyPreference::Conservative => self.income,
            StrategyPreference::Balanced => self.balanced,
            StrategyPreference::Growth => self.growth.at(risk),
            StrategyPreference::Aggressive => self.growth.scaled(1.0),
        }
    }

    /// Sum of the four component weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.liquidity_weight + self.spread_weight + self.time_weight + self.delta_weight
    }

    /// Categorize a score with the configured thresholds.
    #[must_use]
    pub fn categorize(&self, score: f64) -> Category {
        Category::from_score_with(score, self.aggressive_threshold, self.balanced_threshold)
    }
}
