//! Pipeline configuration for normalization, filtering and selection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::option_chain::services::{
    DEFAULT_MONEYNESS_BAND, DEFAULT_RELEVANCE_CAP, DEFAULT_SANITY_CEILING,
};
use crate::domain::recommendation::services::DEFAULT_TOP_K;

/// Synchronous pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum premium (bid/ask/last) before a record is treated as malformed.
    #[serde(default = "default_sanity_ceiling")]
    pub sanity_ceiling: Decimal,
    /// Maximum contracts kept by the relevance filter.
    #[serde(default = "default_relevance_cap")]
    pub relevance_cap: usize,
    /// Strike band around the underlying price, as a fraction.
    #[serde(default = "default_moneyness_band")]
    pub moneyness_band: Decimal,
    /// Candidates passed to enrichment.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Minimum volume for a contract to count toward directional balance.
    #[serde(default = "default_balance_min_volume")]
    pub balance_min_volume: u64,
    /// Minimum open interest for a contract to count toward directional balance.
    #[serde(default = "default_balance_min_open_interest")]
    pub balance_min_open_interest: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sanity_ceiling: default_sanity_ceiling(),
            relevance_cap: default_relevance_cap(),
            moneyness_band: default_moneyness_band(),
            top_k: default_top_k(),
            balance_min_volume: default_balance_min_volume(),
            balance_min_open_interest: default_balance_min_open_interest(),
        }
    }
}

const fn default_sanity_ceiling() -> Decimal {
    DEFAULT_SANITY_CEILING
}

const fn default_relevance_cap() -> usize {
    DEFAULT_RELEVANCE_CAP
}

const fn default_moneyness_band() -> Decimal {
    DEFAULT_MONEYNESS_BAND
}

const fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

const fn default_balance_min_volume() -> u64 {
    10
}

const fn default_balance_min_open_interest() -> u64 {
    100
}
