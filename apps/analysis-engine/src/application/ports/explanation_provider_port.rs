//! Explanation Provider Port (Driven Port)
//!
//! Interface to an external natural-language explanation service.
//! Only the contract is modelled here; prompt construction and transport
//! belong to the adapter.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::option_chain::{Moneyness, OptionGreeks, OptionType};
use crate::domain::recommendation::{
    Category, ExplanationContext, RiskTolerance, ScoredCandidate, StrategyPreference,
};

/// What the provider is asked to explain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationPayload {
    /// Contract symbol.
    pub symbol: String,
    /// Underlying symbol.
    pub underlying: String,
    /// Call or put.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Decimal,
    /// Expiration date, when known.
    pub expiration: Option<NaiveDate>,
    /// Days to expiration.
    pub days_to_expiration: i64,
    /// Mid price.
    pub mid: Decimal,
    /// Spread as a percent of mid.
    pub spread_percent: f64,
    /// Session volume.
    pub volume: u64,
    /// Open interest.
    pub open_interest: u64,
    /// Upstream Greeks.
    pub greeks: OptionGreeks,
    /// Underlying price, when known.
    pub underlying_price: Option<Decimal>,
    /// Moneyness, when the underlying price is known.
    pub moneyness: Option<Moneyness>,
    /// Deterministic base score.
    pub base_score: f64,
    /// Computed category.
    pub category: Category,
    /// Strategy preference.
    pub preference: StrategyPreference,
    /// Risk tolerance.
    pub risk_tolerance: RiskTolerance,
}

impl ExplanationPayload {
    /// Build a payload from a scored candidate and its request context.
    #[must_use]
    pub fn from_candidate(candidate: &ScoredCandidate, context: &ExplanationContext) -> Self {
        let contract = &candidate.contract;
        Self {
            symbol: contract.symbol.clone(),
            underlying: contract.underlying.clone(),
            option_type: contract.option_type,
            strike: contract.strike,
            expiration: contract.expiration,
            days_to_expiration: candidate.days_to_expiration,
            mid: contract.mid,
            spread_percent: contract.spread_percent,
            volume: contract.volume,
            open_interest: contract.open_interest,
            greeks: contract.greeks,
            underlying_price: context.underlying_price,
            moneyness: contract.moneyness(context.underlying_price),
            base_score: candidate.base_score,
            category: candidate.category,
            preference: context.preference,
            risk_tolerance: context.risk_tolerance,
        }
    }
}

/// Provider answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderExplanation {
    /// Natural-language rationale.
    pub explanation: String,
    /// Suggested category label, unvalidated.
    #[serde(default)]
    pub category: Option<String>,
    /// Confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl ProviderExplanation {
    /// Plain explanation with no category or confidence.
    #[must_use]
    pub fn text(explanation: impl Into<String>) -> Self {
        Self {
            explanation: explanation.into(),
            category: None,
            confidence: None,
        }
    }
}

/// Explanation provider error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExplanationProviderError {
    /// No credentials configured.
    #[error("Explanation provider not configured")]
    NotConfigured,

    /// Provider rate limit hit.
    #[error("Explanation provider rate limited")]
    RateLimited {
        /// Seconds to wait, if the provider said.
        retry_after_secs: Option<u64>,
    },

    /// Account quota exhausted.
    #[error("Explanation provider quota exceeded: {message}")]
    QuotaExceeded {
        /// Provider message.
        message: String,
    },

    /// Provider call timed out at the transport level.
    #[error("Explanation provider timed out")]
    Timeout,

    /// Transport or non-success HTTP status.
    #[error("Explanation provider HTTP error: {message}")]
    Http {
        /// Error details.
        message: String,
    },

    /// Response could not be interpreted.
    #[error("Invalid explanation response: {message}")]
    InvalidResponse {
        /// Error details.
        message: String,
    },
}

impl ExplanationProviderError {
    /// Whether the error means the provider is unusable for a while.
    ///
    /// These trip the coordinator's provider gate; every other error only
    /// affects the item that saw it.
    #[must_use]
    pub const fn is_quota_signal(&self) -> bool {
        matches!(
            self,
            Self::NotConfigured | Self::RateLimited { .. } | Self::QuotaExceeded { .. }
        )
    }

    /// Stable label for metrics and log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotConfigured => "not_configured",
            Self::RateLimited { .. } => "rate_limited",
            Self::QuotaExceeded { .. } => "quota_exceeded",
            Self::Timeout => "timeout",
            Self::Http { .. } => "http",
            Self::InvalidResponse { .. } => "invalid_response",
        }
    }
}

/// Port for an external explanation service.
#[async_trait]
pub trait ExplanationProviderPort: Send + Sync {
    /// Explain a single candidate.
    async fn explain(
        &self,
        payload: &ExplanationPayload,
    ) -> Result<ProviderExplanation, ExplanationProviderError>;

    /// Whether the provider has what it needs to be called at all.
    fn is_configured(&self) -> bool;
}

/// Provider used when no credentials are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledProvider;

#[async_trait]
impl ExplanationProviderPort for DisabledProvider {
    async fn explain(
        &self,
        _payload: &ExplanationPayload,
    ) -> Result<ProviderExplanation, ExplanationProviderError> {
        Err(ExplanationProviderError::NotConfigured)
    }

    fn is_configured(&self) -> bool {
        false
    }
}
