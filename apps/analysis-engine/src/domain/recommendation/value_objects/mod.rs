//! Recommendation Value Objects

mod category;
mod enriched_recommendation;
mod enrichment;
mod preference;
mod scored_candidate;
mod scoring_parameters;

pub use category::Category;
pub use enriched_recommendation::{Composition, EnrichedRecommendation, EnrichmentSummary};
pub use enrichment::{Enrichment, EnrichmentSource, EnrichmentStatus, ExplanationContext};
pub use preference::{RiskTolerance, StrategyPreference, UnknownPreference};
pub use scored_candidate::{ScoreBreakdown, ScoredCandidate};
pub use scoring_parameters::{GrowthProfile, ScoringParameters, TargetProfile};
