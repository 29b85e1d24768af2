//! Config and Snapshot Loading Tests
//!
//! Loads YAML config and provider chain dumps from disk and runs the
//! production wiring end to end without an API key.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::fs;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;
use tempfile::TempDir;

use analysis_engine::application::dto::{AnalysisRequest, ExplainOptionRequest};
use analysis_engine::application::ports::{MarketDataError, MarketDataPort};
use analysis_engine::application::use_cases::AnalysisError;
use analysis_engine::config::{ConfigError, load_config};
use analysis_engine::domain::option_chain::OptionType;
use analysis_engine::domain::recommendation::{EnrichmentStatus, StrategyPreference};
use analysis_engine::infrastructure::config::ProductionContainer;
use analysis_engine::infrastructure::marketdata::JsonSnapshotMarketData;

fn write_config(dir: &TempDir, body: &str) -> String {
    let path = dir.path().join("config.yaml");
    fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

/// Tradier-style dump with string numbers and nested Greeks.
fn write_tradier_chain(dir: &TempDir) {
    let document = json!({
        "underlying_price": "412.50",
        "options": { "option": [
            {
                "symbol": "MSFT250221C00415000",
                "root_symbol": "MSFT",
                "option_type": "call",
                "strike": "415",
                "expiration_date": "2025-02-21",
                "bid": "6.10",
                "ask": "6.30",
                "volume": "1200",
                "open_interest": "8400",
                "greeks": { "delta": "0.47", "mid_iv": "0.24" },
            },
            {
                "symbol": "MSFT250221P00410000",
                "root_symbol": "MSFT",
                "option_type": "put",
                "strike": "410",
                "expiration_date": "2025-02-21",
                "bid": "5.20",
                "ask": "5.45",
                "volume": "900",
                "open_interest": "6100",
                "greeks": { "delta": "-0.44", "mid_iv": "0.25" },
            },
            {
                "symbol": "MSFT250221C00400000",
                "root_symbol": "MSFT",
                "option_type": "call",
                "strike": "400",
                "expiration_date": "2025-02-21",
                "bid": "410.00",
                "ask": "415.00",
                "volume": "3",
                "open_interest": "10",
            },
        ]},
    });
    fs::write(
        dir.path().join("MSFT_2025-02-21.json"),
        serde_json::to_vec_pretty(&document).unwrap(),
    )
    .unwrap();
}

#[test]
fn loads_yaml_with_defaults_for_missing_sections() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
pipeline:
  top_k: 7
enrichment:
  concurrency: 2
  ai_score_weight: 0.35
explainer:
  api_key: "${ANALYSIS_ENGINE_TEST_UNSET_KEY:-}"
"#,
    );

    let config = load_config(Some(&path)).unwrap();

    assert_eq!(config.pipeline.top_k, 7);
    assert_eq!(config.pipeline.relevance_cap, 50);
    assert_eq!(config.pipeline.sanity_ceiling, dec!(50));
    assert_eq!(config.enrichment.concurrency, 2);
    assert_eq!(config.enrichment.ai_score_weight, 0.35);
    assert!(!config.explainer.is_configured());
}

#[test]
fn invalid_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "enrichment:\n  concurrency: 0\n");

    let err = load_config(Some(&path)).unwrap_err();

    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yaml");

    let err = load_config(Some(&path.to_string_lossy())).unwrap_err();

    assert!(matches!(err, ConfigError::ReadError { .. }));
}

#[tokio::test]
async fn snapshot_adapter_serves_chain_and_price() {
    let dir = TempDir::new().unwrap();
    write_tradier_chain(&dir);
    let market = JsonSnapshotMarketData::new(dir.path());

    assert_eq!(market.get_underlying_price("MSFT").await.unwrap(), None);
    let records = market.get_option_chain("msft", "2025-02-21").await.unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(
        market.get_underlying_price("MSFT").await.unwrap(),
        Some(dec!(412.50))
    );

    let err = market.get_option_chain("MSFT", "2025-03-21").await.unwrap_err();
    assert!(matches!(err, MarketDataError::SymbolNotFound { .. }));
}

#[tokio::test]
async fn production_wiring_runs_rule_based_end_to_end() {
    let dir = TempDir::new().unwrap();
    write_tradier_chain(&dir);
    let path = write_config(
        &dir,
        &format!("market_data:\n  snapshot_dir: \"{}\"\n", dir.path().display()),
    );
    let config = load_config(Some(&path)).unwrap();
    let container = ProductionContainer::from_config(&config).unwrap();
    let as_of = NaiveDate::from_ymd_opt(2025, 1, 22).unwrap();

    let result = container
        .analyze_chain_use_case()
        .execute(
            AnalysisRequest::new("msft", "2025-02-21")
                .with_preference(StrategyPreference::Growth)
                .with_as_of(as_of),
        )
        .await
        .unwrap();

    assert_eq!(result.symbol, "MSFT");
    assert_eq!(result.underlying_price, Some(dec!(412.50)));
    assert_eq!(result.normalization.rejected_implausible_premium, 1);
    assert_eq!(result.count, 2);
    assert_eq!(result.composition.calls, 1);
    assert_eq!(result.composition.puts, 1);
    assert_eq!(result.enrichment.skipped, 2);

    let explained = container
        .explain_option_use_case()
        .execute(
            ExplainOptionRequest::by_strike("MSFT", "2025-02-21", dec!(410), OptionType::Put)
                .with_as_of(as_of),
        )
        .await
        .unwrap();
    assert_eq!(explained.recommendation.symbol(), "MSFT250221P00410000");
    assert_eq!(
        explained.recommendation.enrichment_status,
        EnrichmentStatus::ProviderUnavailable
    );
    assert!(explained.recommendation.explanation.contains("410"));

    let missing = container
        .explain_option_use_case()
        .execute(ExplainOptionRequest::by_symbol(
            "MSFT",
            "2025-02-21",
            "MSFT250221C00999000",
        ))
        .await
        .unwrap_err();
    assert!(matches!(missing, AnalysisError::ContractNotFound { .. }));
}
