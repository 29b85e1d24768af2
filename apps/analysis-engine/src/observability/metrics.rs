//! Prometheus metrics for the analysis engine.
//!
//! Counters and histograms for chain normalization, enrichment outcomes and
//! end-to-end analysis latency. Recording is a no-op until a recorder is
//! installed, so library users and tests pay nothing.
//!
//! # Example
//!
//! ```ignore
//! use analysis_engine::config::MetricsConfig;
//! use analysis_engine::observability::init_metrics;
//!
//! init_metrics(&MetricsConfig::default())?;
//! ```

use std::net::SocketAddr;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::config::MetricsConfig;
use crate::domain::option_chain::NormalizationReport;

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the listen address is invalid or the exporter fails
/// to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .map_err(|e| MetricsError::Configuration(format!("{}: {e}", config.listen_addr)))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(addr = %addr, "Prometheus metrics exporter started");

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Chain Metrics
// ============================================================================

/// Record the outcome of one normalization pass.
pub fn record_normalization(report: &NormalizationReport) {
    counter!("chain_contracts_normalized_total", "outcome" => "accepted")
        .increment(report.accepted as u64);
    counter!("chain_contracts_normalized_total", "outcome" => "missing_contract_type")
        .increment(report.rejected_missing_type as u64);
    counter!("chain_contracts_normalized_total", "outcome" => "implausible_premium")
        .increment(report.rejected_implausible_premium as u64);
}

// ============================================================================
// Enrichment Metrics
// ============================================================================

/// Record one enrichment item.
///
/// # Arguments
///
/// * `source` - Explanation source ("ai", "rule_based")
/// * `outcome` - Status ("ai", "timeout", "failure", "provider_unavailable")
/// * `latency_seconds` - Time spent on the item
pub fn record_enrichment_item(source: &str, outcome: &str, latency_seconds: f64) {
    counter!(
        "enrichment_items_total",
        "source" => source.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    histogram!("enrichment_latency_seconds", "source" => source.to_string())
        .record(latency_seconds);
}

/// Record the explanation provider being gated off.
pub fn record_provider_trip(reason: &str) {
    counter!("enrichment_provider_trips_total", "reason" => reason.to_string()).increment(1);
}

// ============================================================================
// Analysis Metrics
// ============================================================================

/// Record end-to-end analysis latency.
pub fn record_analysis_duration(preference: &str, seconds: f64) {
    histogram!("analysis_duration_seconds", "preference" => preference.to_string())
        .record(seconds);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_is_noop() {
        record_normalization(&NormalizationReport::default());
        record_enrichment_item("ai", "ai", 0.25);
        record_provider_trip("rate_limited");
        record_analysis_duration("income", 1.5);
    }

    #[test]
    fn invalid_listen_addr_is_configuration_error() {
        let config = MetricsConfig {
            listen_addr: "not-an-address".to_string(),
            ..MetricsConfig::default()
        };
        assert!(matches!(
            init_metrics(&config),
            Err(MetricsError::Configuration(_))
        ));
    }
}
