//! OpenAI Explanation Provider Tests
//!
//! Runs the chat-completions adapter against a local mock server.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use analysis_engine::application::dto::AnalysisRequest;
use analysis_engine::application::ports::{
    ExplanationPayload, ExplanationProviderError, ExplanationProviderPort,
};
use analysis_engine::config::{Config, ExplainerConfig};
use analysis_engine::domain::option_chain::{
    ContractQuote, NormalizedContract, OptionGreeks, OptionType, RawContract,
};
use analysis_engine::domain::recommendation::{
    BaseScorer, Category, EnrichmentSource, ExplanationContext, RiskTolerance, StrategyPreference,
};
use analysis_engine::infrastructure::config::Container;
use analysis_engine::infrastructure::explanation::OpenAiExplanationProvider;
use analysis_engine::infrastructure::marketdata::InMemoryMarketData;

fn explainer_config(server: &MockServer) -> ExplainerConfig {
    ExplainerConfig {
        api_key: "sk-test".to_string(),
        base_url: format!("{}/v1", server.uri()),
        request_timeout_secs: 5,
        ..ExplainerConfig::default()
    }
}

fn payload() -> ExplanationPayload {
    let expiration = NaiveDate::from_ymd_opt(2025, 1, 22).unwrap();
    let quote = ContractQuote::new("QQQ250122C00520000", "QQQ", OptionType::Call, dec!(520))
        .with_expiration(expiration)
        .with_quote(dec!(4.10), dec!(4.30))
        .with_liquidity(250, 1800)
        .with_greeks(OptionGreeks::with_delta(0.48));
    let contract = NormalizedContract::from_quote(quote).unwrap();
    let candidate = BaseScorer::default().score(
        contract,
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        StrategyPreference::Balanced,
        RiskTolerance::Moderate,
    );
    let context = ExplanationContext {
        symbol: "QQQ".to_string(),
        preference: StrategyPreference::Balanced,
        risk_tolerance: RiskTolerance::Moderate,
        underlying_price: Some(dec!(515)),
    };
    ExplanationPayload::from_candidate(&candidate, &context)
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop",
        }],
    })
}

#[tokio::test]
async fn parses_structured_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(bearer_token("sk-test"))
        .and(body_partial_json(json!({ "model": "gpt-4o-mini" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"explanation": "Near the money with ample liquidity.", "category": "Balanced", "confidence": 0.72}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiExplanationProvider::new(&explainer_config(&server)).unwrap();
    let answer = provider.explain(&payload()).await.unwrap();

    assert_eq!(answer.explanation, "Near the money with ample liquidity.");
    assert_eq!(answer.category.as_deref(), Some("Balanced"));
    assert_eq!(answer.confidence, Some(0.72));
}

#[tokio::test]
async fn plain_text_answer_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion("A steady, liquid contract.")),
        )
        .mount(&server)
        .await;

    let provider = OpenAiExplanationProvider::new(&explainer_config(&server)).unwrap();
    let answer = provider.explain(&payload()).await.unwrap();

    assert_eq!(answer.explanation, "A steady, liquid contract.");
    assert_eq!(answer.category, None);
    assert_eq!(answer.confidence, None);
}

#[tokio::test]
async fn too_many_requests_is_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "20")
                .set_body_json(json!({
                    "error": { "message": "Rate limit reached", "code": "rate_limit_exceeded" }
                })),
        )
        .mount(&server)
        .await;

    let provider = OpenAiExplanationProvider::new(&explainer_config(&server)).unwrap();
    let err = provider.explain(&payload()).await.unwrap_err();

    assert_eq!(
        err,
        ExplanationProviderError::RateLimited {
            retry_after_secs: Some(20)
        }
    );
    assert!(err.is_quota_signal());
}

#[tokio::test]
async fn insufficient_quota_is_quota_exceeded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "message": "You exceeded your current quota",
                "type": "insufficient_quota",
                "code": "insufficient_quota",
            }
        })))
        .mount(&server)
        .await;

    let provider = OpenAiExplanationProvider::new(&explainer_config(&server)).unwrap();
    let err = provider.explain(&payload()).await.unwrap_err();

    assert!(matches!(err, ExplanationProviderError::QuotaExceeded { .. }));
}

#[tokio::test]
async fn server_error_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let provider = OpenAiExplanationProvider::new(&explainer_config(&server)).unwrap();
    let err = provider.explain(&payload()).await.unwrap_err();

    assert!(matches!(err, ExplanationProviderError::Http { .. }));
    assert!(!err.is_quota_signal());
}

#[tokio::test]
async fn missing_key_never_calls_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = ExplainerConfig {
        api_key: String::new(),
        ..explainer_config(&server)
    };
    let provider = OpenAiExplanationProvider::new(&config).unwrap();

    assert!(!provider.is_configured());
    assert_eq!(
        provider.explain(&payload()).await.unwrap_err(),
        ExplanationProviderError::NotConfigured
    );
}

#[tokio::test]
async fn analysis_blends_provider_answers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"explanation": "Fits a growth tilt.", "category": "Aggressive", "confidence": 0.9}"#,
        )))
        .expect(2)
        .mount(&server)
        .await;

    let chain = vec![
        RawContract::from_value(json!({
            "option_symbol": "QQQ250122C00520000",
            "type": "C",
            "strike_price": "520",
            "bid_price": 4.1,
            "ask_price": 4.3,
            "day_volume": 250,
            "openInterest": 1800,
            "option_greeks": { "delta": 0.48 },
        })),
        RawContract::from_value(json!({
            "option_symbol": "QQQ250122P00510000",
            "type": "P",
            "strike_price": "510",
            "bid_price": 3.6,
            "ask_price": 3.8,
            "day_volume": 180,
            "openInterest": 1400,
            "option_greeks": { "delta": -0.42 },
        })),
    ];
    let market = InMemoryMarketData::new()
        .with_chain("QQQ", "2025-01-22", chain)
        .with_price("QQQ", dec!(515));

    let mut config = Config::default();
    config.explainer = explainer_config(&server);
    let provider = OpenAiExplanationProvider::new(&config.explainer).unwrap();
    let container = Container::new(Arc::new(market), Arc::new(provider), &config);

    let result = container
        .analyze_chain_use_case()
        .execute(
            AnalysisRequest::new("QQQ", "2025-01-22")
                .with_as_of(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
        )
        .await
        .unwrap();

    assert_eq!(result.count, 2);
    assert_eq!(result.enrichment.ai, 2);
    assert_eq!(result.composition.calls, 1);
    assert_eq!(result.composition.puts, 1);
    for rec in &result.recommendations {
        assert_eq!(rec.enrichment_source, EnrichmentSource::Ai);
        assert_eq!(rec.category, Category::Aggressive);
        assert_eq!(rec.explanation, "Fits a growth tilt.");
    }
}
