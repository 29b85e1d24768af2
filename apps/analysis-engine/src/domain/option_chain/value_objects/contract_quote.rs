//! Contract Quote Value Object
//!
//! A provider record after alias resolution and numeric coercion, before
//! sanity checks. Missing numeric fields are zero.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OptionGreeks, OptionType};

/// Typed provider quote for a single contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractQuote {
    /// OCC symbol (synthesized when the provider omits it).
    pub symbol: String,
    /// Underlying symbol.
    pub underlying: String,
    /// Call or put; `None` when no alias resolved.
    pub option_type: Option<OptionType>,
    /// Strike price.
    pub strike: Decimal,
    /// Expiration date.
    pub expiration: Option<NaiveDate>,
    /// Best bid.
    pub bid: Decimal,
    /// Best ask.
    pub ask: Decimal,
    /// Last trade price.
    pub last: Decimal,
    /// Session volume.
    pub volume: u64,
    /// Open interest.
    pub open_interest: u64,
    /// Greeks supplied upstream.
    pub greeks: OptionGreeks,
}

impl ContractQuote {
    /// Create a quote with no market data.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        underlying: impl Into<String>,
        option_type: OptionType,
        strike: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            underlying: underlying.into(),
            option_type: Some(option_type),
            strike,
            expiration: None,
            bid: Decimal::ZERO,
            ask: Decimal::ZERO,
            last: Decimal::ZERO,
            volume: 0,
            open_interest: 0,
            greeks: OptionGreeks::default(),
        }
    }

    /// Set the expiration date.
    #[must_use]
    pub const fn with_expiration(mut self, expiration: NaiveDate) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Set bid and ask.
    #[must_use]
    pub const fn with_quote(mut self, bid: Decimal, ask: Decimal) -> Self {
        self.bid = bid;
        self.ask = ask;
        self
    }

    /// Set the last trade price.
    #[must_use]
    pub const fn with_last(mut self, last: Decimal) -> Self {
        self.last = last;
        self
    }

    /// Set volume and open interest.
    #[must_use]
    pub const fn with_liquidity(mut self, volume: u64, open_interest: u64) -> Self {
        self.volume = volume;
        self.open_interest = open_interest;
        self
    }

    /// Set the Greeks.
    #[must_use]
    pub const fn with_greeks(mut self, greeks: OptionGreeks) -> Self {
        self.greeks = greeks;
        self
    }

    /// Largest premium-bearing field (bid, ask, last).
    #[must_use]
    pub fn max_premium(&self) -> Decimal {
        self.bid.max(self.ask).max(self.last)
    }
}
