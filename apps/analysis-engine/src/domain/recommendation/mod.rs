//! Recommendation Bounded Context
//!
//! This module ranks normalized contracts for a strategy preference:
//! - Deterministic weighted base scoring
//! - Top-K candidate selection with a directional balance guard
//! - Rule-based explanations (the enrichment fallback)
//! - Final assembly and ranking of enriched recommendations

pub mod services;
pub mod value_objects;

pub use services::{
    AssembledResult, BaseScorer, CandidateSelector, LiquidityThreshold, ResultAssembler,
    RuleBasedExplanation, rank_order,
};
pub use value_objects::{
    Category, Composition, EnrichedRecommendation, Enrichment, EnrichmentSource, EnrichmentStatus,
    EnrichmentSummary, ExplanationContext, RiskTolerance, ScoreBreakdown, ScoredCandidate,
    ScoringParameters, StrategyPreference, TargetProfile,
};
