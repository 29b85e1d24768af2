//! Market Data Port (Driven Port)
//!
//! Interface for fetching option chains from external providers.
//! Records are passed through as raw provider JSON; the chain normalizer
//! owns all field resolution.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::option_chain::RawContract;

/// Market data error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarketDataError {
    /// Connection error.
    #[error("Market data connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Symbol not found.
    #[error("Symbol not found: {symbol}")]
    SymbolNotFound {
        /// The unknown symbol.
        symbol: String,
    },

    /// Data unavailable.
    #[error("Market data unavailable: {message}")]
    DataUnavailable {
        /// Error details.
        message: String,
    },

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// API error.
    #[error("Market data API error: {message}")]
    ApiError {
        /// Error details.
        message: String,
    },
}

/// Port for fetching option chains.
///
/// This is a driven (secondary/outbound) port. The infrastructure layer
/// provides implementations (JSON snapshots, in-memory fixtures).
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Get the raw option chain for an underlying and expiration.
    ///
    /// An empty chain is not an error.
    async fn get_option_chain(
        &self,
        symbol: &str,
        expiration: &str,
    ) -> Result<Vec<RawContract>, MarketDataError>;

    /// Get the current underlying price, if the provider knows it.
    async fn get_underlying_price(&self, symbol: &str) -> Result<Option<Decimal>, MarketDataError>;
}
