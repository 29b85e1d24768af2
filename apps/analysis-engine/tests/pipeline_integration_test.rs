//! Pipeline Integration Tests
//!
//! Drives raw chains through normalization, filtering, scoring, selection and
//! (rule-based) enrichment, checking the end-to-end scenarios and properties.

#![allow(clippy::unwrap_used, clippy::float_cmp, clippy::cast_precision_loss)]

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal_macros::dec;
use serde_json::json;

use analysis_engine::application::dto::AnalysisRequest;
use analysis_engine::application::ports::DisabledProvider;
use analysis_engine::application::services::{
    AnalysisPipeline, CoordinatorSettings, EnrichmentCoordinator,
};
use analysis_engine::application::use_cases::AnalyzeChainUseCase;
use analysis_engine::domain::option_chain::{ChainNormalizer, RawContract, RelevanceFilter};
use analysis_engine::domain::recommendation::{
    BaseScorer, CandidateSelector, EnrichmentSource, ResultAssembler, StrategyPreference,
};
use analysis_engine::infrastructure::marketdata::InMemoryMarketData;

// =============================================================================
// Fixtures
// =============================================================================

const SYMBOL: &str = "AAPL";
const EXPIRATION: &str = "2025-01-22";

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

#[allow(clippy::too_many_arguments)]
fn record(
    symbol: &str,
    option_type: &str,
    strike: f64,
    bid: f64,
    ask: f64,
    volume: u64,
    open_interest: u64,
    delta: f64,
) -> RawContract {
    RawContract::from_value(json!({
        "symbol": symbol,
        "underlying": SYMBOL,
        "option_type": option_type,
        "strike": strike,
        "expiration_date": EXPIRATION,
        "bid": bid,
        "ask": ask,
        "volume": volume,
        "open_interest": open_interest,
        "greeks": { "delta": delta },
    }))
}

/// 600 calls and 400 puts with strikes from $50 to $249 around a $150 underlying.
fn large_chain() -> Vec<RawContract> {
    let calls = (0..600).map(|i| {
        let strike = 50.0 + f64::from(i % 200);
        record(&format!("AAPL-C-{i:04}"), "call", strike, 1.0, 1.1, 20, 200, 0.5)
    });
    let puts = (0..400).map(|i| {
        let strike = 50.0 + f64::from(i % 200);
        record(&format!("AAPL-P-{i:04}"), "put", strike, 1.0, 1.1, 20, 200, -0.5)
    });
    calls.chain(puts).collect()
}

fn use_case(
    market: InMemoryMarketData,
    pipeline: AnalysisPipeline,
) -> AnalyzeChainUseCase<InMemoryMarketData, DisabledProvider> {
    AnalyzeChainUseCase::new(
        Arc::new(market),
        Arc::new(pipeline),
        Arc::new(EnrichmentCoordinator::new(
            Arc::new(DisabledProvider),
            CoordinatorSettings::default(),
        )),
    )
}

fn pipeline_with_top_k(top_k: usize) -> AnalysisPipeline {
    AnalysisPipeline::new(
        ChainNormalizer::default(),
        RelevanceFilter::default(),
        BaseScorer::default(),
        CandidateSelector::new(top_k),
        ResultAssembler::default(),
    )
}

fn request() -> AnalysisRequest {
    AnalysisRequest::new(SYMBOL, EXPIRATION)
        .with_preference(StrategyPreference::Income)
        .with_as_of(as_of())
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn large_chain_is_bounded_and_balanced() {
    let market = InMemoryMarketData::new()
        .with_chain(SYMBOL, EXPIRATION, large_chain())
        .with_price(SYMBOL, dec!(150));

    let result = use_case(market, AnalysisPipeline::default())
        .execute(request())
        .await
        .unwrap();

    assert_eq!(result.normalization.accepted, 1000);
    assert!(result.count <= 50);
    assert_eq!(result.count, result.recommendations.len());
    assert_eq!(result.composition.calls, 25);
    assert_eq!(result.composition.puts, 25);
    for rec in &result.recommendations {
        let strike = rec.candidate.contract.strike;
        assert!(strike >= dec!(120) && strike <= dec!(180), "{strike} outside band");
    }
}

#[tokio::test]
async fn near_target_income_candidate_scores_high() {
    let chain = vec![record(
        "AAPL250122P00145000",
        "put",
        145.0,
        1.98,
        2.02,
        50,
        600,
        -0.35,
    )];
    let market = InMemoryMarketData::new()
        .with_chain(SYMBOL, EXPIRATION, chain)
        .with_price(SYMBOL, dec!(150));

    let result = use_case(market, AnalysisPipeline::default())
        .execute(request())
        .await
        .unwrap();

    let rec = &result.recommendations[0];
    assert_eq!(rec.candidate.days_to_expiration, 21);
    // liquidity 0.225 + spread 0.16 + time 0.20 + delta 0.30
    assert!((rec.candidate.base_score - 0.885).abs() < 1e-9);
    assert_eq!(rec.final_score, rec.candidate.base_score);
}

#[tokio::test]
async fn equity_priced_record_never_surfaces() {
    let chain = vec![
        record("AAPL250122C00150000", "call", 150.0, 120.0, 125.0, 500, 5000, 0.5),
        record("AAPL250122C00155000", "call", 155.0, 2.0, 2.1, 100, 500, 0.4),
    ];
    let market = InMemoryMarketData::new()
        .with_chain(SYMBOL, EXPIRATION, chain)
        .with_price(SYMBOL, dec!(150));

    let result = use_case(market, AnalysisPipeline::default())
        .execute(request())
        .await
        .unwrap();

    assert_eq!(result.normalization.rejected_implausible_premium, 1);
    assert_eq!(result.count, 1);
    assert!(
        result
            .recommendations
            .iter()
            .all(|r| r.symbol() != "AAPL250122C00150000")
    );
}

#[tokio::test]
async fn empty_chain_reports_no_options() {
    let market = InMemoryMarketData::new().with_chain(SYMBOL, EXPIRATION, Vec::new());

    let result = use_case(market, AnalysisPipeline::default())
        .execute(request())
        .await
        .unwrap();

    assert_eq!(result.count, 0);
    assert!(result.no_options_found);
    assert!(result.recommendations.is_empty());
    assert_eq!(result.message, "No options found for AAPL 2025-01-22");
}

#[tokio::test]
async fn chain_of_only_rejects_reports_no_options() {
    let chain = vec![RawContract::from_value(json!({
        "symbol": "???",
        "strike": 150,
        "bid": 1.0,
        "ask": 1.1,
    }))];
    let market = InMemoryMarketData::new().with_chain(SYMBOL, EXPIRATION, chain);

    let result = use_case(market, AnalysisPipeline::default())
        .execute(request())
        .await
        .unwrap();

    assert!(result.no_options_found);
    assert_eq!(result.normalization.rejected_missing_type, 1);
}

// =============================================================================
// Properties
// =============================================================================

#[tokio::test]
async fn repeated_runs_rank_identically() {
    let market = InMemoryMarketData::new()
        .with_chain(SYMBOL, EXPIRATION, large_chain())
        .with_price(SYMBOL, dec!(150));
    let use_case = use_case(market, AnalysisPipeline::default());

    let first = use_case.execute(request()).await.unwrap();
    let second = use_case.execute(request()).await.unwrap();

    assert_ne!(first.analysis_id, second.analysis_id);
    assert_eq!(first.recommendations, second.recommendations);
    for (a, b) in first.recommendations.iter().zip(&second.recommendations) {
        assert_eq!(a.candidate.base_score.to_bits(), b.candidate.base_score.to_bits());
    }
}

#[test]
fn one_sided_scoring_still_yields_both_sides() {
    // Calls sit on the income targets; puts are far from them but liquid.
    let mut chain: Vec<RawContract> = (0..10)
        .map(|i| {
            record(
                &format!("AAPL-C-{i:02}"),
                "call",
                150.0 + f64::from(i),
                1.98,
                2.02,
                50,
                600,
                0.35,
            )
        })
        .collect();
    chain.extend((0..3).map(|i| {
        record(&format!("AAPL-P-{i:02}"), "put", 100.0 + f64::from(i), 0.5, 1.5, 20, 0, -0.95)
    }));

    let prepared = pipeline_with_top_k(5).prepare(
        chain,
        NaiveDate::from_ymd_opt(2025, 1, 22),
        Some(dec!(150)),
        as_of(),
        StrategyPreference::Income,
        Default::default(),
    );

    assert_eq!(prepared.candidates.len(), 5);
    assert!(prepared.candidates.iter().any(|c| c.contract.is_put()));
    assert!(prepared.candidates.iter().any(|c| c.contract.is_call()));
}

#[tokio::test]
async fn rule_based_batch_keeps_every_item() {
    let market = InMemoryMarketData::new()
        .with_chain(SYMBOL, EXPIRATION, large_chain())
        .with_price(SYMBOL, dec!(150));

    let result = use_case(market, pipeline_with_top_k(12))
        .execute(request())
        .await
        .unwrap();

    assert_eq!(result.count, 12);
    assert_eq!(result.enrichment.rule_based, 12);
    assert!(result.enrichment.provider_unavailable);
    assert!(
        result
            .recommendations
            .iter()
            .all(|r| r.enrichment_source == EnrichmentSource::RuleBased && !r.explanation.is_empty())
    );
}

fn arb_record() -> impl Strategy<Value = RawContract> {
    (
        any::<bool>(),
        50u32..250,
        0u32..20_000,
        0u32..20_000,
        0u32..20_000,
        0u64..1_000,
        0u64..5_000,
        -100i32..=100,
    )
        .prop_map(|(is_call, strike, bid, ask, last, volume, oi, delta)| {
            let option_type = if is_call { "call" } else { "put" };
            RawContract::from_value(json!({
                "option_type": option_type,
                "strike": strike,
                "bid": format!("{}.{:02}", bid / 100, bid % 100),
                "ask": format!("{}.{:02}", ask / 100, ask % 100),
                "last": format!("{}.{:02}", last / 100, last % 100),
                "volume": volume,
                "open_interest": oi,
                "greeks": { "delta": f64::from(delta) / 100.0 },
            }))
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn selection_never_exceeds_top_k(
        chain in prop::collection::vec(arb_record(), 0..300),
        top_k in 1usize..20,
    ) {
        let prepared = pipeline_with_top_k(top_k).prepare(
            chain,
            NaiveDate::from_ymd_opt(2025, 1, 22),
            Some(dec!(150)),
            as_of(),
            StrategyPreference::Balanced,
            Default::default(),
        );
        prop_assert!(prepared.candidates.len() <= top_k);
        prop_assert!(prepared.relevant <= 50);
    }

    #[test]
    fn implausible_premiums_are_excluded(chain in prop::collection::vec(arb_record(), 0..100)) {
        let normalized = ChainNormalizer::default().normalize(chain, None);
        for contract in &normalized.contracts {
            prop_assert!(contract.bid.max(contract.ask).max(contract.last) <= dec!(50));
        }
        prop_assert_eq!(
            normalized.report.accepted + normalized.report.rejected(),
            normalized.report.total
        );
    }

    #[test]
    fn scoring_is_reproducible(chain in prop::collection::vec(arb_record(), 1..60)) {
        let pipeline = AnalysisPipeline::default();
        let run = || {
            pipeline.prepare(
                chain.clone(),
                NaiveDate::from_ymd_opt(2025, 2, 14),
                Some(dec!(150)),
                as_of(),
                StrategyPreference::Growth,
                Default::default(),
            )
        };
        let first = run();
        let second = run();
        prop_assert_eq!(first.candidates.len(), second.candidates.len());
        for (a, b) in first.candidates.iter().zip(&second.candidates) {
            prop_assert_eq!(a.symbol(), b.symbol());
            prop_assert_eq!(a.base_score.to_bits(), b.base_score.to_bits());
        }
    }
}
