//! Strategy Preference and Risk Tolerance Value Objects

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Strategy the caller wants recommendations tailored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyPreference {
    /// Premium collection; shorter-dated, lower-delta contracts.
    Income,
    /// Directional upside; longer-dated, higher-delta contracts.
    Growth,
    /// Middle of the road.
    #[default]
    Balanced,
    /// Growth targets at full scale.
    Aggressive,
    /// Income targets.
    Conservative,
}

impl StrategyPreference {
    /// Lowercase name as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Growth => "growth",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
            Self::Conservative => "conservative",
        }
    }
}

impl std::fmt::Display for StrategyPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized preference or risk tolerance value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownPreference {
    /// Which field was being parsed.
    pub kind: &'static str,
    /// The rejected value.
    pub value: String,
}

impl FromStr for StrategyPreference {
    type Err = UnknownPreference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "growth" => Ok(Self::Growth),
            "balanced" => Ok(Self::Balanced),
            "aggressive" => Ok(Self::Aggressive),
            "conservative" => Ok(Self::Conservative),
            _ => Err(UnknownPreference {
                kind: "preference",
                value: s.to_string(),
            }),
        }
    }
}

/// Caller's risk tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    /// Low risk tolerance.
    Low,
    /// Moderate risk tolerance.
    #[default]
    #[serde(alias = "medium")]
    Moderate,
    /// High risk tolerance.
    High,
}

impl RiskTolerance {
    /// Position within the growth DTE range (0 = shortest, 1 = longest).
    #[must_use]
    pub const fn growth_factor(self) -> f64 {
        match self {
            Self::Low => 0.0,
            Self::Moderate => 0.5,
            Self::High => 1.0,
        }
    }

    /// Lowercase name as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTolerance {
    type Err = UnknownPreference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "moderate" | "medium" => Ok(Self::Moderate),
            "high" => Ok(Self::High),
            _ => Err(UnknownPreference {
                kind: "risk tolerance",
                value: s.to_string(),
            }),
        }
    }
}
