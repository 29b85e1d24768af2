//! Enriched Recommendation Value Objects

use serde::{Deserialize, Serialize};

use super::{Category, EnrichmentSource, EnrichmentStatus, ScoredCandidate};
use crate::domain::option_chain::Moneyness;

/// A ranked, explained recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecommendation {
    /// The scored candidate; its `base_score` is never modified by enrichment.
    pub candidate: ScoredCandidate,
    /// Natural-language rationale.
    pub explanation: String,
    /// Ranking score after enrichment.
    pub final_score: f64,
    /// Final category (computed, or a valid provider override).
    pub category: Category,
    /// Where the explanation came from.
    pub enrichment_source: EnrichmentSource,
    /// How the enrichment attempt resolved.
    pub enrichment_status: EnrichmentStatus,
    /// Moneyness, when the underlying price is known.
    pub moneyness: Option<Moneyness>,
}

impl EnrichedRecommendation {
    /// Contract symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        self.candidate.symbol()
    }
}

/// Call/put split of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Composition {
    /// Number of calls.
    pub calls: usize,
    /// Number of puts.
    pub puts: usize,
}

impl Composition {
    /// Count calls and puts.
    pub fn of<'a>(items: impl IntoIterator<Item = &'a EnrichedRecommendation>) -> Self {
        items
            .into_iter()
            .fold(Self::default(), |mut acc, item| {
                if item.candidate.contract.is_call() {
                    acc.calls += 1;
                } else {
                    acc.puts += 1;
                }
                acc
            })
    }

    /// True when a non-empty set contains only one side.
    #[must_use]
    pub const fn is_one_sided(&self) -> bool {
        (self.calls == 0) != (self.puts == 0)
    }
}

/// Fallback-usage metadata for a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnrichmentSummary {
    /// Items explained by the provider.
    pub ai: usize,
    /// Items explained by the rule-based fallback.
    pub rule_based: usize,
    /// Items whose provider call timed out.
    pub timeouts: usize,
    /// Items whose provider call failed.
    pub failures: usize,
    /// Items that skipped the provider entirely.
    pub skipped: usize,
    /// Whether the provider was unavailable for any part of the batch.
    pub provider_unavailable: bool,
}

impl EnrichmentSummary {
    /// Tally statuses.
    pub fn of(statuses: impl IntoIterator<Item = EnrichmentStatus>) -> Self {
        statuses.into_iter().fold(Self::default(), |mut acc, status| {
            match status {
                EnrichmentStatus::Ai => acc.ai += 1,
                EnrichmentStatus::Timeout => acc.timeouts += 1,
                EnrichmentStatus::Failure => acc.failures += 1,
                EnrichmentStatus::ProviderUnavailable => {
                    acc.skipped += 1;
                    acc.provider_unavailable = true;
                }
            }
            if status.source() == EnrichmentSource::RuleBased {
                acc.rule_based += 1;
            }
            acc
        })
    }
}
