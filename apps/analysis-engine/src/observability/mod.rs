//! Observability module for metrics and logging.
//!
//! This module provides instrumentation for the analysis engine:
//! Prometheus metrics export and `tracing-subscriber` initialization.

mod logging;
mod metrics;

pub use logging::{LoggingError, init_logging};
pub use metrics::{
    MetricsError, init_metrics, record_analysis_duration, record_enrichment_item,
    record_normalization, record_provider_trip,
};
