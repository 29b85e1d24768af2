//! Analysis Pipeline
//!
//! The synchronous stages: normalize, filter, score, select. Enrichment
//! and assembly are driven by the use cases around it.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::option_chain::{
    ChainNormalizer, NormalizationReport, NormalizedContract, RawContract, RelevanceFilter,
};
use crate::domain::recommendation::{
    AssembledResult, BaseScorer, CandidateSelector, Enrichment, ResultAssembler, RiskTolerance,
    ScoredCandidate, StrategyPreference,
};
use crate::observability;

/// Candidates ready for enrichment.
#[derive(Debug, Clone, Default)]
pub struct PreparedCandidates {
    /// Top-K candidates in rank order.
    pub candidates: Vec<ScoredCandidate>,
    /// Normalization counts.
    pub report: NormalizationReport,
    /// Contracts surviving the relevance filter.
    pub relevant: usize,
}

/// The domain services wired in stage order.
#[derive(Debug, Clone, Default)]
pub struct AnalysisPipeline {
    normalizer: ChainNormalizer,
    filter: RelevanceFilter,
    scorer: BaseScorer,
    selector: CandidateSelector,
    assembler: ResultAssembler,
}

impl AnalysisPipeline {
    /// Wire the stages.
    #[must_use]
    pub const fn new(
        normalizer: ChainNormalizer,
        filter: RelevanceFilter,
        scorer: BaseScorer,
        selector: CandidateSelector,
        assembler: ResultAssembler,
    ) -> Self {
        Self {
            normalizer,
            filter,
            scorer,
            selector,
            assembler,
        }
    }

    /// The base scorer.
    #[must_use]
    pub const fn scorer(&self) -> &BaseScorer {
        &self.scorer
    }

    /// The result assembler.
    #[must_use]
    pub const fn assembler(&self) -> &ResultAssembler {
        &self.assembler
    }

    /// Normalize raw records, recording the outcome.
    #[must_use]
    pub fn normalize(
        &self,
        records: Vec<RawContract>,
        default_expiration: Option<NaiveDate>,
    ) -> (Vec<NormalizedContract>, NormalizationReport) {
        let chain = self.normalizer.normalize(records, default_expiration);

        for rejection in &chain.rejections {
            tracing::debug!(reason = rejection.reason(), %rejection, "Dropped chain record");
        }
        observability::record_normalization(&chain.report);
        tracing::debug!(
            total = chain.report.total,
            accepted = chain.report.accepted,
            rejected = chain.report.rejected(),
            "Normalized chain"
        );

        (chain.contracts, chain.report)
    }

    /// Run every synchronous stage.
    #[must_use]
    pub fn prepare(
        &self,
        records: Vec<RawContract>,
        default_expiration: Option<NaiveDate>,
        underlying_price: Option<Decimal>,
        as_of: NaiveDate,
        preference: StrategyPreference,
        risk: RiskTolerance,
    ) -> PreparedCandidates {
        let (contracts, report) = self.normalize(records, default_expiration);

        let relevant = self.filter.filter(contracts, underlying_price);
        let relevant_count = relevant.len();

        let scored = self.scorer.score_all(relevant, as_of, preference, risk);
        let candidates = self.selector.select(scored);

        tracing::debug!(
            relevant = relevant_count,
            selected = candidates.len(),
            top_k = self.selector.top_k(),
            "Selected candidates"
        );

        PreparedCandidates {
            candidates,
            report,
            relevant: relevant_count,
        }
    }

    /// Merge enrichments and produce the final ranking.
    #[must_use]
    pub fn assemble(
        &self,
        enriched: Vec<(ScoredCandidate, Enrichment)>,
        underlying_price: Option<Decimal>,
    ) -> AssembledResult {
        self.assembler.assemble(enriched, underlying_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::option_chain::{OptionType, RelevanceFilter};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn record(option_type: &str, strike: f64, bid: f64, ask: f64) -> RawContract {
        let delta = if option_type == "call" { 0.45 } else { -0.45 };
        RawContract::from_value(json!({
            "underlying": "AAPL",
            "option_type": option_type,
            "strike": strike,
            "bid": bid,
            "ask": ask,
            "volume": 200,
            "open_interest": 800,
            "greeks": {"delta": delta}
        }))
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn rejects_implausible_premiums_before_scoring() {
        let pipeline = AnalysisPipeline::default();
        let prepared = pipeline.prepare(
            vec![
                record("call", 150.0, 120.0, 125.0),
                record("put", 150.0, 2.0, 2.1),
            ],
            NaiveDate::from_ymd_opt(2025, 1, 17),
            Some(dec!(150)),
            as_of(),
            StrategyPreference::Balanced,
            RiskTolerance::Moderate,
        );

        assert_eq!(prepared.report.rejected_implausible_premium, 1);
        assert_eq!(prepared.candidates.len(), 1);
        assert_eq!(prepared.candidates[0].contract.option_type, OptionType::Put);
    }

    #[test]
    fn never_selects_more_than_top_k() {
        let pipeline = AnalysisPipeline::new(
            ChainNormalizer::default(),
            RelevanceFilter::default(),
            BaseScorer::default(),
            CandidateSelector::new(4),
            ResultAssembler::default(),
        );
        let records = (0..30)
            .map(|i| record(if i % 2 == 0 { "call" } else { "put" }, 140.0 + f64::from(i), 1.0, 1.1))
            .collect();

        let prepared = pipeline.prepare(
            records,
            NaiveDate::from_ymd_opt(2025, 1, 17),
            Some(dec!(150)),
            as_of(),
            StrategyPreference::Income,
            RiskTolerance::Low,
        );
        assert_eq!(prepared.relevant, 30);
        assert_eq!(prepared.candidates.len(), 4);
    }
}
