//! Option Type and Moneyness Value Objects

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl OptionType {
    /// Parse a provider contract-type value.
    ///
    /// Accepts `call`/`c` and `put`/`p`, case-insensitive.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "call" | "c" | "calls" => Some(Self::Call),
            "put" | "p" | "puts" => Some(Self::Put),
            _ => None,
        }
    }

    /// Derive the type from an OCC option symbol (e.g. `AAPL250117C00150000`).
    ///
    /// The type letter sits before the 8-digit strike and after the
    /// 6-digit expiration.
    #[must_use]
    pub fn from_occ_symbol(symbol: &str) -> Option<Self> {
        let compact: String = symbol.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = compact.as_bytes();
        if bytes.len() < 16 {
            return None;
        }

        let type_index = bytes.len() - 9;
        let strike_digits = &bytes[type_index + 1..];
        let date_digits = &bytes[type_index - 6..type_index];
        if !strike_digits.iter().all(u8::is_ascii_digit)
            || !date_digits.iter().all(u8::is_ascii_digit)
        {
            return None;
        }

        match bytes[type_index] {
            b'C' => Some(Self::Call),
            b'P' => Some(Self::Put),
            _ => None,
        }
    }

    /// Single-letter code used in synthesized symbols.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Call => 'C',
            Self::Put => 'P',
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// Relationship between a contract's strike and the underlying price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Moneyness {
    /// In the money.
    Itm,
    /// At the money (strike within the ATM band of the underlying).
    Atm,
    /// Out of the money.
    Otm,
}

impl Moneyness {
    /// Strikes within 2% of the underlying are treated as at-the-money.
    pub const ATM_BAND: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

    /// Classify a contract, or `None` when the underlying price is unknown.
    #[must_use]
    pub fn classify(option_type: OptionType, strike: Decimal, underlying: Decimal) -> Option<Self> {
        if underlying <= Decimal::ZERO {
            return None;
        }

        if ((strike - underlying) / underlying).abs() <= Self::ATM_BAND {
            return Some(Self::Atm);
        }

        let in_the_money = match option_type {
            OptionType::Call => strike < underlying,
            OptionType::Put => strike > underlying,
        };
        Some(if in_the_money { Self::Itm } else { Self::Otm })
    }

    /// Human-readable phrase for explanations.
    #[must_use]
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::Itm => "in the money",
            Self::Atm => "at the money",
            Self::Otm => "out of the money",
        }
    }
}

impl std::fmt::Display for Moneyness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Itm => write!(f, "ITM"),
            Self::Atm => write!(f, "ATM"),
            Self::Otm => write!(f, "OTM"),
        }
    }
}
