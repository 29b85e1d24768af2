//! Option Chain Errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a single upstream chain record is dropped during normalization.
///
/// These never fail a batch; they are counted in the normalization report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    /// No aliased field (or OCC symbol) identified the record as a call or put.
    #[error("Contract type could not be resolved for {symbol}")]
    MissingContractType {
        /// Contract symbol, or a placeholder when absent.
        symbol: String,
    },

    /// A premium field exceeds the sanity ceiling.
    ///
    /// Usually the provider returned the underlying's equity price instead of
    /// the option premium.
    #[error("Implausible premium {premium} for {symbol} (ceiling {ceiling})")]
    ImplausiblePremium {
        /// Contract symbol.
        symbol: String,
        /// Largest of bid, ask and last.
        premium: Decimal,
        /// Configured sanity ceiling.
        ceiling: Decimal,
    },
}

impl MalformedRecord {
    /// Short label for metrics and log fields.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::MissingContractType { .. } => "missing_contract_type",
            Self::ImplausiblePremium { .. } => "implausible_premium",
        }
    }
}
