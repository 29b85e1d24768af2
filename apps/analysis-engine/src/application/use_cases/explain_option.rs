//! Explain Option Use Case
//!
//! Deep analysis of a single contract: locate it in the chain, score it for
//! the requested preference and enrich it alone under the deep-analysis
//! timeout. Shares the coordinator (and its provider gate) with chain
//! analysis.

use std::sync::Arc;

use uuid::Uuid;

use super::analyze_chain::{resolve_underlying_price, today};
use super::errors::AnalysisError;
use crate::application::dto::{ExplainOptionRequest, ExplainOptionResult};
use crate::application::ports::{ExplanationProviderPort, MarketDataPort};
use crate::application::services::{AnalysisPipeline, EnrichmentCoordinator};
use crate::domain::option_chain::NormalizedContract;
use crate::domain::recommendation::ExplanationContext;

/// Use case for explaining one contract.
pub struct ExplainOptionUseCase<M, P>
where
    M: MarketDataPort,
    P: ExplanationProviderPort,
{
    market_data: Arc<M>,
    pipeline: Arc<AnalysisPipeline>,
    coordinator: Arc<EnrichmentCoordinator<P>>,
}

impl<M, P> ExplainOptionUseCase<M, P>
where
    M: MarketDataPort,
    P: ExplanationProviderPort,
{
    /// Create a new ExplainOptionUseCase.
    pub const fn new(
        market_data: Arc<M>,
        pipeline: Arc<AnalysisPipeline>,
        coordinator: Arc<EnrichmentCoordinator<P>>,
    ) -> Self {
        Self {
            market_data,
            pipeline,
            coordinator,
        }
    }

    /// Execute the use case.
    #[tracing::instrument(
        skip(self, request),
        fields(
            symbol = %request.symbol,
            expiration = %request.expiration,
            target = %request.describe_target(),
        )
    )]
    pub async fn execute(
        &self,
        request: ExplainOptionRequest,
    ) -> Result<ExplainOptionResult, AnalysisError> {
        let analysis_id = Uuid::new_v4();

        let records = self
            .market_data
            .get_option_chain(&request.symbol, &request.expiration)
            .await
            .map_err(AnalysisError::MarketDataUnavailable)?;

        let (contracts, _) = self
            .pipeline
            .normalize(records, request.expiration_date());

        let contract = find_contract(contracts, &request).ok_or_else(|| {
            AnalysisError::ContractNotFound {
                target: request.describe_target(),
            }
        })?;

        let underlying_price = resolve_underlying_price(
            self.market_data.as_ref(),
            &request.symbol,
            request.known_price(),
        )
        .await;

        let candidate = self.pipeline.scorer().score(
            contract,
            request.as_of.unwrap_or_else(today),
            request.preference,
            request.risk_tolerance,
        );

        let context = ExplanationContext {
            symbol: request.symbol.clone(),
            preference: request.preference,
            risk_tolerance: request.risk_tolerance,
            underlying_price,
        };
        let enrichment = self.coordinator.enrich_single(&candidate, &context).await;
        let recommendation = self
            .pipeline
            .assembler()
            .merge(candidate, enrichment, underlying_price);

        tracing::info!(
            contract = %recommendation.symbol(),
            base_score = recommendation.candidate.base_score,
            source = %recommendation.enrichment_source,
            "Contract explained"
        );

        Ok(ExplainOptionResult {
            analysis_id,
            underlying_price,
            recommendation,
        })
    }
}

/// Find the requested contract: by symbol when given, else by strike
/// (and type, when given). Ties on strike go to the first call.
fn find_contract(
    contracts: Vec<NormalizedContract>,
    request: &ExplainOptionRequest,
) -> Option<NormalizedContract> {
    if let Some(symbol) = &request.contract_symbol {
        return contracts
            .into_iter()
            .find(|c| c.symbol.eq_ignore_ascii_case(symbol));
    }

    let strike = request.strike?;
    let mut matches: Vec<NormalizedContract> = contracts
        .into_iter()
        .filter(|c| c.strike == strike)
        .filter(|c| request.option_type.is_none_or(|t| c.option_type == t))
        .collect();
    matches.sort_by_key(NormalizedContract::is_put);
    matches.into_iter().next()
}
