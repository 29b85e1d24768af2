//! Enrichment configuration: pool size, timeouts and score blending.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::services::CoordinatorSettings;

/// Enrichment coordinator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Maximum concurrent provider calls.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Per-item timeout for batch enrichment, in seconds.
    #[serde(default = "default_item_timeout_secs")]
    pub item_timeout_secs: u64,
    /// Timeout for single-contract deep analysis, in seconds.
    #[serde(default = "default_deep_analysis_timeout_secs")]
    pub deep_analysis_timeout_secs: u64,
    /// How long a quota or rate-limit error disables the provider, in seconds.
    #[serde(default = "default_quota_cooldown_secs")]
    pub quota_cooldown_secs: u64,
    /// Weight of provider confidence in the final score (0.0 - 1.0).
    #[serde(default = "default_ai_score_weight")]
    pub ai_score_weight: f64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            item_timeout_secs: default_item_timeout_secs(),
            deep_analysis_timeout_secs: default_deep_analysis_timeout_secs(),
            quota_cooldown_secs: default_quota_cooldown_secs(),
            ai_score_weight: default_ai_score_weight(),
        }
    }
}

impl EnrichmentConfig {
    /// Coordinator settings for this configuration.
    #[must_use]
    pub const fn coordinator_settings(&self) -> CoordinatorSettings {
        CoordinatorSettings {
            concurrency: self.concurrency,
            item_timeout: Duration::from_secs(self.item_timeout_secs),
            deep_analysis_timeout: Duration::from_secs(self.deep_analysis_timeout_secs),
            cooldown: Duration::from_secs(self.quota_cooldown_secs),
        }
    }
}

const fn default_concurrency() -> usize {
    3
}

const fn default_item_timeout_secs() -> u64 {
    25
}

const fn default_deep_analysis_timeout_secs() -> u64 {
    15
}

const fn default_quota_cooldown_secs() -> u64 {
    300
}

const fn default_ai_score_weight() -> f64 {
    0.2
}
