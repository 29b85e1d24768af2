// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Analysis Engine - Options Chain Recommendations
//!
//! Turns a raw option chain into a short, ranked, explained list of
//! contracts fitted to a strategy preference and risk tolerance.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Deterministic business logic
//!   - `option_chain`: Record normalization, premium sanity, relevance filtering
//!   - `recommendation`: Base scoring, top-K selection, rule-based text, ranking
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`MarketDataPort`, `ExplanationProviderPort`)
//!   - `services`: Explainers, provider gate, enrichment coordinator
//!   - `use_cases`: `AnalyzeChain`, `ExplainOption`
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `explanation`: OpenAI-compatible chat completions adapter
//!   - `marketdata`: JSON snapshot and in-memory chain sources
//!   - `config`: Dependency injection container

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// YAML configuration with environment interpolation.
pub mod config;

/// Logging and Prometheus metrics.
pub mod observability;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::option_chain::{
    ChainNormalizer, NormalizedContract, OptionType, RawContract, RelevanceFilter,
};
pub use domain::recommendation::{
    BaseScorer, CandidateSelector, Category, EnrichedRecommendation, EnrichmentSource,
    EnrichmentStatus, ResultAssembler, RiskTolerance, ScoredCandidate, ScoringParameters,
    StrategyPreference,
};

// Application re-exports
pub use application::dto::{
    AnalysisRequest, AnalysisResult, ExplainOptionRequest, ExplainOptionResult,
};
pub use application::ports::{
    DisabledProvider, ExplanationProviderError, ExplanationProviderPort, MarketDataError,
    MarketDataPort,
};
pub use application::services::{AnalysisPipeline, EnrichmentCoordinator, ProviderGate};
pub use application::use_cases::{AnalysisError, AnalyzeChainUseCase, ExplainOptionUseCase};

// Infrastructure re-exports
pub use infrastructure::config::{Container, ProductionContainer};
pub use infrastructure::explanation::OpenAiExplanationProvider;
pub use infrastructure::marketdata::{InMemoryMarketData, JsonSnapshotMarketData};
