//! Market data source configuration.

use serde::{Deserialize, Serialize};

/// Market data configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataConfig {
    /// Directory holding `{SYMBOL}_{EXPIRATION}.json` chain snapshots.
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
        }
    }
}

fn default_snapshot_dir() -> String {
    "data/chains".to_string()
}
