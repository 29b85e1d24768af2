//! Use case errors.

use thiserror::Error;

use crate::application::ports::MarketDataError;

/// Request-level analysis failures.
///
/// Everything else (malformed records, provider errors, timeouts) is
/// recovered inside the pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The option chain could not be fetched.
    #[error("Market data unavailable: {0}")]
    MarketDataUnavailable(#[source] MarketDataError),

    /// The requested contract is not in the chain.
    #[error("Contract not found: {target}")]
    ContractNotFound {
        /// Description of what was looked up.
        target: String,
    },
}
