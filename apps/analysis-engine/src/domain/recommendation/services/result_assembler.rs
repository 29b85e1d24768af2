//! Result Assembler
//!
//! Merges scored candidates with their enrichments into the final ranked
//! list. The base score is carried through untouched; only `final_score`
//! and (for a valid provider label) the category may differ from it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::candidate_selector::contract_order;
use crate::domain::option_chain::Moneyness;
use crate::domain::recommendation::value_objects::{
    Category, Composition, EnrichedRecommendation, Enrichment, EnrichmentSource,
    EnrichmentSummary, ScoredCandidate,
};

/// Default weight of provider confidence in the final score.
pub const DEFAULT_AI_SCORE_WEIGHT: f64 = 0.2;

/// Ranked recommendations with batch-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledResult {
    /// Recommendations ordered by final score.
    pub recommendations: Vec<EnrichedRecommendation>,
    /// Call/put split.
    pub composition: Composition,
    /// Enrichment outcome tally.
    pub summary: EnrichmentSummary,
}

/// Builds the final ranking.
#[derive(Debug, Clone, Copy)]
pub struct ResultAssembler {
    ai_score_weight: f64,
}

impl Default for ResultAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_AI_SCORE_WEIGHT)
    }
}

impl ResultAssembler {
    /// Create an assembler; the weight is clamped to `[0, 1]`.
    #[must_use]
    pub fn new(ai_score_weight: f64) -> Self {
        Self {
            ai_score_weight: ai_score_weight.clamp(0.0, 1.0),
        }
    }

    /// Weight given to provider confidence.
    #[must_use]
    pub const fn ai_score_weight(&self) -> f64 {
        self.ai_score_weight
    }

    /// Merge and rank. Every input pair yields exactly one recommendation.
    #[must_use]
    pub fn assemble(
        &self,
        enriched: Vec<(ScoredCandidate, Enrichment)>,
        underlying_price: Option<Decimal>,
    ) -> AssembledResult {
        let summary = EnrichmentSummary::of(enriched.iter().map(|(_, e)| e.status));

        let mut recommendations: Vec<EnrichedRecommendation> = enriched
            .into_iter()
            .map(|(candidate, enrichment)| self.merge(candidate, enrichment, underlying_price))
            .collect();

        recommendations.sort_by(|a, b| {
            b.final_score
                .total_cmp(&a.final_score)
                .then_with(|| b.candidate.base_score.total_cmp(&a.candidate.base_score))
                .then_with(|| contract_order(&a.candidate.contract, &b.candidate.contract))
        });

        AssembledResult {
            composition: Composition::of(&recommendations),
            recommendations,
            summary,
        }
    }

    /// Merge a single candidate with its enrichment.
    #[must_use]
    pub fn merge(
        &self,
        candidate: ScoredCandidate,
        enrichment: Enrichment,
        underlying_price: Option<Decimal>,
    ) -> EnrichedRecommendation {
        let source = enrichment.source();
        let from_provider = source == EnrichmentSource::Ai;

        let final_score = match enrichment.confidence {
            Some(confidence) if from_provider && confidence.is_finite() => {
                let confidence = confidence.clamp(0.0, 1.0);
                (1.0 - self.ai_score_weight).mul_add(
                    candidate.base_score,
                    self.ai_score_weight * confidence,
                )
            }
            _ => candidate.base_score,
        };

        let category = enrichment
            .category_label
            .as_deref()
            .filter(|_| from_provider)
            .and_then(Category::parse_label)
            .unwrap_or(candidate.category);

        let moneyness: Option<Moneyness> = candidate.contract.moneyness(underlying_price);

        EnrichedRecommendation {
            candidate,
            explanation: enrichment.explanation,
            final_score,
            category,
            enrichment_source: source,
            enrichment_status: enrichment.status,
            moneyness,
        }
    }
}
