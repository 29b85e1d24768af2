//! Normalized Contract Value Object

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::{ContractQuote, Moneyness, OptionGreeks, OptionType};

/// Spread assigned when no two-sided market exists.
const NO_MARKET_SPREAD_PERCENT: f64 = 100.0;

/// Canonical contract shape consumed by scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedContract {
    /// OCC symbol.
    pub symbol: String,
    /// Underlying symbol.
    pub underlying: String,
    /// Call or put.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Decimal,
    /// Expiration date, when known.
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
    /// Mid price.
    pub mid: Decimal,
    /// Bid-ask spread as a percent of mid.
    pub spread_percent: f64,
}

impl NormalizedContract {
    /// Derive mid and spread from a resolved quote.
    ///
    /// Returns `None` when the quote has no contract type.
    #[must_use]
    pub fn from_quote(quote: ContractQuote) -> Option<Self> {
        let option_type = quote.option_type?;
        let two_sided = quote.bid > Decimal::ZERO && quote.ask > Decimal::ZERO;

        let mid = if two_sided {
            (quote.bid + quote.ask) / Decimal::TWO
        } else if quote.last > Decimal::ZERO {
            quote.last
        } else {
            quote.bid.max(quote.ask)
        };

        let spread_percent = if two_sided && mid > Decimal::ZERO {
            ((quote.ask - quote.bid).abs() / mid * Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or(NO_MARKET_SPREAD_PERCENT)
        } else {
            NO_MARKET_SPREAD_PERCENT
        };

        Some(Self {
            symbol: quote.symbol,
            underlying: quote.underlying,
            option_type,
            strike: quote.strike,
            expiration: quote.expiration,
            bid: quote.bid,
            ask: quote.ask,
            last: quote.last,
            volume: quote.volume,
            open_interest: quote.open_interest,
            greeks: quote.greeks,
            mid,
            spread_percent,
        })
    }

    /// Check if this is a call option.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        matches!(self.option_type, OptionType::Call)
    }

    /// Check if this is a put option.
    #[must_use]
    pub const fn is_put(&self) -> bool {
        matches!(self.option_type, OptionType::Put)
    }

    /// Days from `as_of` to expiration, floored at zero.
    #[must_use]
    pub fn days_to_expiration(&self, as_of: NaiveDate) -> i64 {
        self.expiration
            .map_or(0, |expiration| (expiration - as_of).num_days().max(0))
    }

    /// Absolute distance between strike and the underlying price.
    #[must_use]
    pub fn distance_from(&self, underlying_price: Decimal) -> Decimal {
        (self.strike - underlying_price).abs()
    }

    /// Moneyness against the underlying price, when known.
    #[must_use]
    pub fn moneyness(&self, underlying_price: Option<Decimal>) -> Option<Moneyness> {
        underlying_price
            .and_then(|price| Moneyness::classify(self.option_type, self.strike, price))
    }
}
