//! Scored Candidate Value Object

use serde::{Deserialize, Serialize};

use super::Category;
use crate::domain::option_chain::NormalizedContract;

/// Per-component contributions to the base score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Liquidity component (volume + open interest).
    pub liquidity: f64,
    /// Bid-ask spread component.
    pub spread: f64,
    /// Time-fit component.
    pub time_fit: f64,
    /// Delta-fit component.
    pub delta_fit: f64,
    /// Clamped total.
    pub total: f64,
}

/// A normalized contract with its base score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// The contract.
    pub contract: NormalizedContract,
    /// Deterministic base score in `[0, 1]`.
    pub base_score: f64,
    /// Category computed from the base score.
    pub category: Category,
    /// Days to expiration at scoring time.
    pub days_to_expiration: i64,
    /// Component contributions.
    pub breakdown: ScoreBreakdown,
}

impl ScoredCandidate {
    /// Contract symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.contract.symbol
    }
}
