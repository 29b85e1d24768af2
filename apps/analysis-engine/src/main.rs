//! Analysis Engine Binary
//!
//! Runs one chain analysis (or one single-contract explanation) and prints
//! the result as JSON on stdout.
//!
//! # Usage
//!
//! ```bash
//! ANALYSIS_SYMBOL=AAPL ANALYSIS_EXPIRATION=2025-01-17 cargo run --bin analysis-engine
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `ANALYSIS_SYMBOL`: Underlying ticker
//! - `ANALYSIS_EXPIRATION`: Expiration date (YYYY-MM-DD)
//!
//! ## Optional
//! - `ANALYSIS_PREFERENCE`: income | growth | balanced | aggressive | conservative (default: balanced)
//! - `ANALYSIS_RISK_TOLERANCE`: low | moderate | high (default: moderate)
//! - `ANALYSIS_UNDERLYING_PRICE`: Known underlying price
//! - `ANALYSIS_CONTRACT`: Explain this contract symbol instead of ranking the chain
//! - `ANALYSIS_ENGINE_CONFIG`: Config file path (default: config.yaml)
//! - `RUST_LOG`: Log filter override

use std::str::FromStr;

use analysis_engine::ProductionContainer;
use analysis_engine::application::dto::{AnalysisRequest, ExplainOptionRequest};
use analysis_engine::config::{
    CONFIG_PATH_ENV, Config, ConfigError, load_config, resolve_config_path,
};
use analysis_engine::domain::recommendation::{RiskTolerance, StrategyPreference};
use analysis_engine::observability::{init_logging, init_metrics};
use anyhow::{Context, Result};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_engine_config()?;
    init_logging(&config.observability.logging)?;
    if config.observability.metrics.enabled {
        init_metrics(&config.observability.metrics)?;
    }

    tracing::info!(
        explainer_configured = config.explainer.is_configured(),
        snapshot_dir = %config.market_data.snapshot_dir,
        "Starting analysis engine"
    );

    let container = ProductionContainer::from_config(&config)
        .context("failed to build explanation provider")?;

    let symbol = required_env("ANALYSIS_SYMBOL")?;
    let expiration = required_env("ANALYSIS_EXPIRATION")?;
    let preference = optional_env::<StrategyPreference>("ANALYSIS_PREFERENCE")?.unwrap_or_default();
    let risk_tolerance =
        optional_env::<RiskTolerance>("ANALYSIS_RISK_TOLERANCE")?.unwrap_or_default();
    let underlying_price = optional_env::<Decimal>("ANALYSIS_UNDERLYING_PRICE")?;

    let output = if let Ok(contract) = std::env::var("ANALYSIS_CONTRACT") {
        let mut request = ExplainOptionRequest::by_symbol(&symbol, &expiration, contract)
            .with_preference(preference)
            .with_risk_tolerance(risk_tolerance);
        if let Some(price) = underlying_price {
            request = request.with_underlying_price(price);
        }
        let result = container.explain_option_use_case().execute(request).await?;
        serde_json::to_string_pretty(&result)?
    } else {
        let mut request = AnalysisRequest::new(&symbol, &expiration)
            .with_preference(preference)
            .with_risk_tolerance(risk_tolerance);
        if let Some(price) = underlying_price {
            request = request.with_underlying_price(price);
        }
        let result = container.analyze_chain_use_case().execute(request).await?;
        serde_json::to_string_pretty(&result)?
    };

    println!("{output}");
    Ok(())
}

/// Load configuration, falling back to defaults when the default file is absent.
fn load_engine_config() -> Result<Config> {
    let explicit = std::env::var(CONFIG_PATH_ENV).is_ok();
    match load_config(None) {
        Ok(config) => Ok(config),
        Err(ConfigError::ReadError { path, .. }) if !explicit => {
            eprintln!("config file '{path}' not found, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e).with_context(|| format!("loading {}", resolve_config_path(None))),
    }
}

fn required_env(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}

fn optional_env<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    std::env::var(name)
        .ok()
        .map(|raw| raw.parse::<T>().with_context(|| format!("invalid {name}: {raw}")))
        .transpose()
}
