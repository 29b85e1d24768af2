//! Analyze Chain Use Case

use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::errors::AnalysisError;
use crate::application::dto::{AnalysisRequest, AnalysisResult};
use crate::application::ports::{ExplanationProviderPort, MarketDataPort};
use crate::application::services::{AnalysisPipeline, EnrichmentCoordinator};
use crate::domain::recommendation::ExplanationContext;
use crate::observability;

/// Use case for turning a raw chain into ranked recommendations.
pub struct AnalyzeChainUseCase<M, P>
where
    M: MarketDataPort,
    P: ExplanationProviderPort,
{
    market_data: Arc<M>,
    pipeline: Arc<AnalysisPipeline>,
    coordinator: Arc<EnrichmentCoordinator<P>>,
}

impl<M, P> AnalyzeChainUseCase<M, P>
where
    M: MarketDataPort,
    P: ExplanationProviderPort,
{
    /// Create a new AnalyzeChainUseCase.
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
            preference = %request.preference,
            analysis_id = tracing::field::Empty,
        )
    )]
    pub async fn execute(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();
        let analysis_id = Uuid::new_v4();
        tracing::Span::current().record("analysis_id", tracing::field::display(analysis_id));

        // 1. Fetch chain
        let records = self
            .market_data
            .get_option_chain(&request.symbol, &request.expiration)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to fetch option chain");
                AnalysisError::MarketDataUnavailable(e)
            })?;

        // 2. Resolve underlying price
        let underlying_price =
            resolve_underlying_price(self.market_data.as_ref(), &request.symbol, request.known_price())
                .await;

        if records.is_empty() {
            tracing::info!("Empty option chain");
            return Ok(AnalysisResult::no_options(
                analysis_id,
                &request,
                underlying_price,
                Default::default(),
            ));
        }

        // 3. Normalize, filter, score, select
        let as_of = request.as_of.unwrap_or_else(today);
        let prepared = self.pipeline.prepare(
            records,
            request.expiration_date(),
            underlying_price,
            as_of,
            request.preference,
            request.risk_tolerance,
        );

        if prepared.candidates.is_empty() {
            tracing::info!(
                rejected = prepared.report.rejected(),
                "No usable contracts after normalization"
            );
            return Ok(AnalysisResult::no_options(
                analysis_id,
                &request,
                underlying_price,
                prepared.report,
            ));
        }

        // 4. Enrich
        let context = ExplanationContext {
            symbol: request.symbol.clone(),
            preference: request.preference,
            risk_tolerance: request.risk_tolerance,
            underlying_price,
        };
        let enriched = self.coordinator.enrich(prepared.candidates, &context).await;

        // 5. Assemble
        let assembled = self.pipeline.assemble(enriched, underlying_price);
        let result = AnalysisResult::ranked(
            analysis_id,
            &request,
            underlying_price,
            prepared.report,
            assembled,
        );

        observability::record_analysis_duration(
            request.preference.as_str(),
            started.elapsed().as_secs_f64(),
        );
        tracing::info!(
            count = result.count,
            calls = result.composition.calls,
            puts = result.composition.puts,
            ai = result.enrichment.ai,
            rule_based = result.enrichment.rule_based,
            "Analysis complete"
        );

        Ok(result)
    }
}

/// Known price if positive, else ask the provider. Lookup failures are
/// logged and treated as unknown.
pub(crate) async fn resolve_underlying_price<M>(
    market_data: &M,
    symbol: &str,
    known: Option<Decimal>,
) -> Option<Decimal>
where
    M: MarketDataPort + ?Sized,
{
    if known.is_some() {
        return known;
    }

    match market_data.get_underlying_price(symbol).await {
        Ok(price) => price.filter(|p| *p > Decimal::ZERO),
        Err(e) => {
            tracing::warn!(error = %e, "Underlying price unavailable, filtering by count");
            None
        }
    }
}

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
