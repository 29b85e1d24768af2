//! Candidate Selector
//!
//! Ranks scored candidates and bounds the set handed to enrichment.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::option_chain::NormalizedContract;
use crate::domain::recommendation::value_objects::ScoredCandidate;

/// Default number of candidates passed to enrichment.
pub const DEFAULT_TOP_K: usize = 50;

/// Total ranking order: base score descending, then larger open interest,
/// then tighter spread, then symbol.
#[must_use]
pub fn rank_order(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.base_score
        .total_cmp(&a.base_score)
        .then_with(|| contract_order(&a.contract, &b.contract))
}

/// Tie-break order between two contracts with equal scores.
#[must_use]
pub fn contract_order(a: &NormalizedContract, b: &NormalizedContract) -> Ordering {
    b.open_interest
        .cmp(&a.open_interest)
        .then_with(|| a.spread_percent.total_cmp(&b.spread_percent))
        .then_with(|| a.symbol.cmp(&b.symbol))
}

/// Minimum activity for a contract to count toward directional balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityThreshold {
    /// Minimum session volume.
    pub min_volume: u64,
    /// Minimum open interest.
    pub min_open_interest: u64,
}

impl Default for LiquidityThreshold {
    fn default() -> Self {
        Self {
            min_volume: 10,
            min_open_interest: 100,
        }
    }
}

impl LiquidityThreshold {
    /// Either volume or open interest meets its minimum.
    #[must_use]
    pub const fn is_met(&self, contract: &NormalizedContract) -> bool {
        contract.volume >= self.min_volume || contract.open_interest >= self.min_open_interest
    }
}

/// Top-K selection with a directional balance guard.
#[derive(Debug, Clone, Copy)]
pub struct CandidateSelector {
    top_k: usize,
    threshold: LiquidityThreshold,
}

impl Default for CandidateSelector {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl CandidateSelector {
    /// Create a selector keeping at most `top_k` candidates.
    #[must_use]
    pub fn new(top_k: usize) -> Self {
        Self {
            top_k,
            threshold: LiquidityThreshold::default(),
        }
    }

    /// Override the liquidity threshold used by the balance guard.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: LiquidityThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Maximum number of candidates returned.
    #[must_use]
    pub const fn top_k(&self) -> usize {
        self.top_k
    }

    /// Rank candidates and keep the top K.
    ///
    /// If the kept set is entirely calls or entirely puts while a liquid
    /// contract of the other side was cut, the lowest-ranked kept item is
    /// swapped for the best such contract. Never returns more than K.
    #[must_use]
    pub fn select(&self, mut candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
        candidates.sort_by(rank_order);
        if candidates.len() <= self.top_k {
            return candidates;
        }

        let remainder = candidates.split_off(self.top_k);
        if self.top_k < 2 {
            return candidates;
        }

        let all_calls = candidates.iter().all(|c| c.contract.is_call());
        let all_puts = candidates.iter().all(|c| c.contract.is_put());
        if !(all_calls || all_puts) {
            return candidates;
        }

        let replacement = remainder.into_iter().find(|c| {
            c.contract.is_call() != all_calls && self.threshold.is_met(&c.contract)
        });

        if let (Some(replacement), Some(last)) = (replacement, candidates.last_mut()) {
            *last = replacement;
        }

        candidates
    }
}
