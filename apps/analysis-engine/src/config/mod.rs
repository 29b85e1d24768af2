//! Configuration module for the analysis engine.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for every pipeline stage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use analysis_engine::config::{Config, load_config};
//!
//! // Load from ANALYSIS_ENGINE_CONFIG, or config.yaml
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("top-K: {}", config.pipeline.top_k);
//! ```

mod enrichment;
mod explainer;
mod market_data;
mod observability;
mod pipeline;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::recommendation::ScoringParameters;

pub use enrichment::EnrichmentConfig;
pub use explainer::ExplainerConfig;
pub use market_data::MarketDataConfig;
pub use observability::{LoggingConfig, MetricsConfig, ObservabilityConfig};
pub use pipeline::PipelineConfig;

/// Environment variable overriding the config file path.
pub const CONFIG_PATH_ENV: &str = "ANALYSIS_ENGINE_CONFIG";

/// Default config file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Tolerance when checking that scoring weights sum to at most one.
const WEIGHT_EPSILON: f64 = 1e-9;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Normalization, filtering and selection.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Base scoring weights and targets.
    #[serde(default)]
    pub scoring: ScoringParameters,
    /// Enrichment pool and timeouts.
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    /// Explanation provider.
    #[serde(default)]
    pub explainer: ExplainerConfig,
    /// Market data source.
    #[serde(default)]
    pub market_data: MarketDataConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

pub(crate) const fn default_true() -> bool {
    true
}

// ============================================
// Configuration Loading
// ============================================

/// Resolve the config path: explicit argument, then `ANALYSIS_ENGINE_CONFIG`,
/// then `config.yaml`.
#[must_use]
pub fn resolve_config_path(path: Option<&str>) -> String {
    path.map(str::to_string)
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().filter(|p| !p.is_empty()))
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = resolve_config_path(path);

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` naming the first invalid field.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let pipeline = &config.pipeline;

    if pipeline.sanity_ceiling <= Decimal::ZERO {
        return invalid("pipeline.sanity_ceiling must be positive");
    }
    if pipeline.relevance_cap == 0 {
        return invalid("pipeline.relevance_cap must be at least 1");
    }
    if pipeline.moneyness_band <= Decimal::ZERO || pipeline.moneyness_band > Decimal::ONE {
        return invalid("pipeline.moneyness_band must be in (0, 1]");
    }
    if pipeline.top_k == 0 {
        return invalid("pipeline.top_k must be at least 1");
    }

    let scoring = &config.scoring;
    let weights = [
        ("liquidity_weight", scoring.liquidity_weight),
        ("spread_weight", scoring.spread_weight),
        ("time_weight", scoring.time_weight),
        ("delta_weight", scoring.delta_weight),
    ];
    if let Some((name, _)) = weights.iter().find(|(_, w)| !w.is_finite() || *w < 0.0) {
        return Err(ConfigError::ValidationError(format!(
            "scoring.{name} must be non-negative"
        )));
    }
    if scoring.total_weight() > 1.0 + WEIGHT_EPSILON {
        return invalid("scoring weights must sum to at most 1.0");
    }
    let windows = [
        ("volume_saturation", scoring.volume_saturation),
        ("open_interest_saturation", scoring.open_interest_saturation),
        ("max_spread_percent", scoring.max_spread_percent),
        ("dte_window", scoring.dte_window),
        ("delta_window", scoring.delta_window),
    ];
    if let Some((name, _)) = windows.iter().find(|(_, w)| !w.is_finite() || *w <= 0.0) {
        return Err(ConfigError::ValidationError(format!(
            "scoring.{name} must be positive"
        )));
    }
    if scoring.balanced_threshold > scoring.aggressive_threshold {
        return invalid("scoring.balanced_threshold must not exceed aggressive_threshold");
    }

    let enrichment = &config.enrichment;
    if enrichment.concurrency == 0 {
        return invalid("enrichment.concurrency must be at least 1");
    }
    if enrichment.item_timeout_secs == 0 || enrichment.deep_analysis_timeout_secs == 0 {
        return invalid("enrichment timeouts must be at least 1 second");
    }
    if !(0.0..=1.0).contains(&enrichment.ai_score_weight) {
        return invalid("enrichment.ai_score_weight must be between 0.0 and 1.0");
    }

    if config.explainer.request_timeout_secs == 0 {
        return invalid("explainer.request_timeout_secs must be at least 1 second");
    }

    let valid_formats = ["json", "pretty"];
    let format = config.observability.logging.format.to_lowercase();
    if !valid_formats.contains(&format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    Ok(())
}

fn invalid(message: &str) -> Result<(), ConfigError> {
    Err(ConfigError::ValidationError(message.to_string()))
}
