//! Enrichment Value Objects

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{RiskTolerance, StrategyPreference};

/// Where a recommendation's explanation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentSource {
    /// External explanation provider.
    Ai,
    /// Deterministic rule-based fallback.
    RuleBased,
}

impl std::fmt::Display for EnrichmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ai => write!(f, "ai"),
            Self::RuleBased => write!(f, "rule_based"),
        }
    }
}

/// How an enrichment attempt resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentStatus {
    /// Provider answered in time.
    Ai,
    /// Provider exceeded the per-item timeout.
    Timeout,
    /// Provider returned an error.
    Failure,
    /// Provider was skipped (not configured, or quota exhausted).
    ProviderUnavailable,
}

impl EnrichmentStatus {
    /// Source implied by the status.
    #[must_use]
    pub const fn source(self) -> EnrichmentSource {
        match self {
            Self::Ai => EnrichmentSource::Ai,
            Self::Timeout | Self::Failure | Self::ProviderUnavailable => {
                EnrichmentSource::RuleBased
            }
        }
    }

    /// Short label for metrics and log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Timeout => "timeout",
            Self::Failure => "failure",
            Self::ProviderUnavailable => "provider_unavailable",
        }
    }
}

/// The explanation attached to one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    /// Natural-language rationale.
    pub explanation: String,
    /// Category label suggested by the provider, unvalidated.
    pub category_label: Option<String>,
    /// Provider confidence in `[0, 1]`, if given.
    pub confidence: Option<f64>,
    /// How the attempt resolved.
    pub status: EnrichmentStatus,
}

impl Enrichment {
    /// A rule-based enrichment with the reason it was used.
    #[must_use]
    pub fn rule_based(explanation: String, status: EnrichmentStatus) -> Self {
        Self {
            explanation,
            category_label: None,
            confidence: None,
            status,
        }
    }

    /// Source of the explanation.
    #[must_use]
    pub const fn source(&self) -> EnrichmentSource {
        self.status.source()
    }
}

/// Request-level context shared by every explanation in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationContext {
    /// Underlying symbol.
    pub symbol: String,
    /// Strategy preference.
    pub preference: StrategyPreference,
    /// Risk tolerance.
    pub risk_tolerance: RiskTolerance,
    /// Underlying price, when known.
    pub underlying_price: Option<Decimal>,
}
