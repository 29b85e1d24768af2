//! Dependency Injection Container
//!
//! Manages creation and wiring of all application components. The pipeline
//! and the enrichment coordinator are shared by every use case the container
//! hands out, so the provider gate is process-wide per container.

use std::sync::Arc;

use crate::application::ports::{
    ExplanationProviderError, ExplanationProviderPort, MarketDataPort,
};
use crate::application::services::{AnalysisPipeline, EnrichmentCoordinator};
use crate::application::use_cases::{AnalyzeChainUseCase, ExplainOptionUseCase};
use crate::config::Config;
use crate::domain::option_chain::{ChainNormalizer, RelevanceFilter};
use crate::domain::recommendation::{
    BaseScorer, CandidateSelector, LiquidityThreshold, ResultAssembler,
};
use crate::infrastructure::explanation::OpenAiExplanationProvider;
use crate::infrastructure::marketdata::JsonSnapshotMarketData;

/// Container wired with the snapshot reader and the OpenAI provider.
pub type ProductionContainer = Container<JsonSnapshotMarketData, OpenAiExplanationProvider>;

/// Build the synchronous pipeline from configuration.
#[must_use]
pub fn build_pipeline(config: &Config) -> AnalysisPipeline {
    let pipeline = &config.pipeline;
    AnalysisPipeline::new(
        ChainNormalizer::new(pipeline.sanity_ceiling),
        RelevanceFilter::new(pipeline.relevance_cap, pipeline.moneyness_band),
        BaseScorer::new(config.scoring.clone()),
        CandidateSelector::new(pipeline.top_k).with_threshold(LiquidityThreshold {
            min_volume: pipeline.balance_min_volume,
            min_open_interest: pipeline.balance_min_open_interest,
        }),
        ResultAssembler::new(config.enrichment.ai_score_weight),
    )
}

/// Dependency injection container.
pub struct Container<M, P>
where
    M: MarketDataPort + 'static,
    P: ExplanationProviderPort + 'static,
{
    market_data: Arc<M>,
    pipeline: Arc<AnalysisPipeline>,
    coordinator: Arc<EnrichmentCoordinator<P>>,
}

impl<M, P> Container<M, P>
where
    M: MarketDataPort + 'static,
    P: ExplanationProviderPort + 'static,
{
    /// Create a new container with all dependencies.
    pub fn new(market_data: Arc<M>, provider: Arc<P>, config: &Config) -> Self {
        Self {
            market_data,
            pipeline: Arc::new(build_pipeline(config)),
            coordinator: Arc::new(EnrichmentCoordinator::new(
                provider,
                config.enrichment.coordinator_settings(),
            )),
        }
    }

    /// Get the market data port.
    pub fn market_data(&self) -> Arc<M> {
        Arc::clone(&self.market_data)
    }

    /// Get the shared enrichment coordinator.
    pub fn coordinator(&self) -> Arc<EnrichmentCoordinator<P>> {
        Arc::clone(&self.coordinator)
    }

    /// Create an `AnalyzeChainUseCase`.
    pub fn analyze_chain_use_case(&self) -> AnalyzeChainUseCase<M, P> {
        AnalyzeChainUseCase::new(
            Arc::clone(&self.market_data),
            Arc::clone(&self.pipeline),
            Arc::clone(&self.coordinator),
        )
    }

    /// Create an `ExplainOptionUseCase`.
    pub fn explain_option_use_case(&self) -> ExplainOptionUseCase<M, P> {
        ExplainOptionUseCase::new(
            Arc::clone(&self.market_data),
            Arc::clone(&self.pipeline),
            Arc::clone(&self.coordinator),
        )
    }
}

impl ProductionContainer {
    /// Wire the production adapters from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ExplanationProviderError> {
        let market_data = Arc::new(JsonSnapshotMarketData::new(&config.market_data.snapshot_dir));
        let provider = Arc::new(OpenAiExplanationProvider::new(&config.explainer)?);
        Ok(Self::new(market_data, provider, config))
    }
}
