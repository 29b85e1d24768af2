//! Raw Contract Value Object
//!
//! A provider chain record exactly as received. Field names vary by provider,
//! so every logical field is looked up through an ordered alias list.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered alias lists per logical field. The first non-null alias wins.
pub mod field_aliases {
    /// Contract type (call/put).
    pub const CONTRACT_TYPE: &[&str] = &[
        "option_type",
        "type",
        "contract_type",
        "put_call",
        "right",
        "side",
    ];
    /// Contract (OCC) symbol.
    pub const SYMBOL: &[&str] = &["symbol", "option_symbol", "contract_symbol", "occ_symbol"];
    /// Underlying symbol.
    pub const UNDERLYING: &[&str] = &["underlying", "underlying_symbol", "root_symbol", "root"];
    /// Strike price.
    pub const STRIKE: &[&str] = &["strike", "strike_price"];
    /// Expiration date.
    pub const EXPIRATION: &[&str] = &["expiration_date", "expiration", "expiry", "expiration_day"];
    /// Best bid.
    pub const BID: &[&str] = &["bid", "bid_price"];
    /// Best ask.
    pub const ASK: &[&str] = &["ask", "ask_price"];
    /// Last trade price.
    pub const LAST: &[&str] = &["last", "last_price", "close"];
    /// Session volume.
    pub const VOLUME: &[&str] = &["volume", "day_volume"];
    /// Open interest.
    pub const OPEN_INTEREST: &[&str] = &["open_interest", "openInterest", "oi"];
    /// Nested Greeks object.
    pub const GREEKS: &[&str] = &["greeks", "option_greeks"];
    /// Implied volatility.
    pub const IMPLIED_VOLATILITY: &[&str] = &["implied_volatility", "mid_iv", "iv", "smv_vol"];
    /// Delta.
    pub const DELTA: &[&str] = &["delta"];
    /// Gamma.
    pub const GAMMA: &[&str] = &["gamma"];
    /// Theta.
    pub const THETA: &[&str] = &["theta"];
    /// Vega.
    pub const VEGA: &[&str] = &["vega"];
}

/// Raw provider record (a JSON object).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawContract(Map<String, Value>);

impl RawContract {
    /// Wrap a JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build from any JSON value; non-objects become an empty record.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    /// Borrow the underlying fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// First non-null value among the aliases.
    #[must_use]
    pub fn field(&self, aliases: &[&str]) -> Option<&Value> {
        aliases
            .iter()
            .filter_map(|alias| self.0.get(*alias))
            .find(|value| !value.is_null())
    }

    /// First alias holding a non-empty string (numbers are rendered).
    #[must_use]
    pub fn text(&self, aliases: &[&str]) -> Option<String> {
        aliases
            .iter()
            .filter_map(|alias| self.0.get(*alias))
            .find_map(|value| match value {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    /// First alias that coerces to a finite number.
    #[must_use]
    pub fn number(&self, aliases: &[&str]) -> Option<f64> {
        aliases
            .iter()
            .filter_map(|alias| self.0.get(*alias))
            .find_map(coerce_f64)
    }

    /// First alias that coerces to a decimal.
    #[must_use]
    pub fn decimal(&self, aliases: &[&str]) -> Option<Decimal> {
        aliases
            .iter()
            .filter_map(|alias| self.0.get(*alias))
            .find_map(coerce_decimal)
    }

    /// The nested Greeks object, if the provider nests Greeks.
    #[must_use]
    pub fn greeks(&self) -> Option<Self> {
        match self.field(field_aliases::GREEKS) {
            Some(Value::Object(fields)) => Some(Self(fields.clone())),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for RawContract {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

fn strip_numeric(raw: &str) -> &str {
    raw.trim().trim_start_matches('$').trim_end_matches('%')
}

/// Coerce a JSON number or numeric string to `f64`.
fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => strip_numeric(s).replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Coerce a JSON number or numeric string to `Decimal`.
fn coerce_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => strip_numeric(s).replace(',', ""),
        _ => return None,
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
        .or_else(|| coerce_f64(value).and_then(|v| Decimal::try_from(v).ok()))
}
