//! Analysis DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::option_chain::{NormalizationReport, OptionType};
use crate::domain::recommendation::{
    AssembledResult, Composition, EnrichedRecommendation, EnrichmentSummary, RiskTolerance,
    StrategyPreference,
};

/// Request to analyze one underlying/expiration chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Underlying symbol.
    pub symbol: String,
    /// Expiration (YYYY-MM-DD).
    pub expiration: String,
    /// Strategy preference.
    #[serde(default)]
    pub preference: StrategyPreference,
    /// Risk tolerance.
    #[serde(default)]
    pub risk_tolerance: RiskTolerance,
    /// Underlying price known by the caller.
    #[serde(default)]
    pub underlying_price: Option<Decimal>,
    /// Date DTE is measured from; today (UTC) when absent.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl AnalysisRequest {
    /// Create a request with default preference and risk tolerance.
    #[must_use]
    pub fn new(symbol: impl Into<String>, expiration: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into().trim().to_uppercase(),
            expiration: expiration.into().trim().to_string(),
            preference: StrategyPreference::default(),
            risk_tolerance: RiskTolerance::default(),
            underlying_price: None,
            as_of: None,
        }
    }

    /// Set the strategy preference.
    #[must_use]
    pub const fn with_preference(mut self, preference: StrategyPreference) -> Self {
        self.preference = preference;
        self
    }

    /// Set the risk tolerance.
    #[must_use]
    pub const fn with_risk_tolerance(mut self, risk_tolerance: RiskTolerance) -> Self {
        self.risk_tolerance = risk_tolerance;
        self
    }

    /// Set a known underlying price.
    #[must_use]
    pub const fn with_underlying_price(mut self, price: Decimal) -> Self {
        self.underlying_price = Some(price);
        self
    }

    /// Pin the date DTE is measured from.
    #[must_use]
    pub const fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Parsed expiration date, when well-formed.
    #[must_use]
    pub fn expiration_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.expiration, "%Y-%m-%d").ok()
    }

    /// Caller-supplied price, if positive.
    #[must_use]
    pub fn known_price(&self) -> Option<Decimal> {
        self.underlying_price.filter(|price| *price > Decimal::ZERO)
    }
}

/// Ranked recommendations for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Correlation ID for logs.
    pub analysis_id: Uuid,
    /// Underlying symbol.
    pub symbol: String,
    /// Expiration.
    pub expiration: String,
    /// Strategy preference.
    pub preference: StrategyPreference,
    /// Risk tolerance.
    pub risk_tolerance: RiskTolerance,
    /// Underlying price used for filtering and moneyness.
    pub underlying_price: Option<Decimal>,
    /// Ranked recommendations.
    pub recommendations: Vec<EnrichedRecommendation>,
    /// Number of recommendations.
    pub count: usize,
    /// True when the chain produced no usable contracts.
    pub no_options_found: bool,
    /// Human-readable status message.
    pub message: String,
    /// Call/put split.
    pub composition: Composition,
    /// Enrichment outcome tally.
    pub enrichment: EnrichmentSummary,
    /// Normalization counts.
    pub normalization: NormalizationReport,
}

impl AnalysisResult {
    /// Result for a chain with nothing to recommend.
    #[must_use]
    pub fn no_options(
        analysis_id: Uuid,
        request: &AnalysisRequest,
        underlying_price: Option<Decimal>,
        normalization: NormalizationReport,
    ) -> Self {
        Self {
            analysis_id,
            symbol: request.symbol.clone(),
            expiration: request.expiration.clone(),
            preference: request.preference,
            risk_tolerance: request.risk_tolerance,
            underlying_price,
            recommendations: Vec::new(),
            count: 0,
            no_options_found: true,
            message: format!("No options found for {} {}", request.symbol, request.expiration),
            composition: Composition::default(),
            enrichment: EnrichmentSummary::default(),
            normalization,
        }
    }

    /// Result built from an assembled ranking.
    #[must_use]
    pub fn ranked(
        analysis_id: Uuid,
        request: &AnalysisRequest,
        underlying_price: Option<Decimal>,
        normalization: NormalizationReport,
        assembled: AssembledResult,
    ) -> Self {
        let count = assembled.recommendations.len();
        Self {
            analysis_id,
            symbol: request.symbol.clone(),
            expiration: request.expiration.clone(),
            preference: request.preference,
            risk_tolerance: request.risk_tolerance,
            underlying_price,
            recommendations: assembled.recommendations,
            count,
            no_options_found: count == 0,
            message: format!(
                "{} recommendations for {} {} ({} calls, {} puts)",
                count,
                request.symbol,
                request.expiration,
                assembled.composition.calls,
                assembled.composition.puts,
            ),
            composition: assembled.composition,
            enrichment: assembled.summary,
            normalization,
        }
    }
}

/// Request to explain a single contract in depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainOptionRequest {
    /// Underlying symbol.
    pub symbol: String,
    /// Expiration (YYYY-MM-DD).
    pub expiration: String,
    /// Contract symbol to look up.
    #[serde(default)]
    pub contract_symbol: Option<String>,
    /// Strike to look up when no contract symbol is given.
    #[serde(default)]
    pub strike: Option<Decimal>,
    /// Option type to look up when no contract symbol is given.
    #[serde(default)]
    pub option_type: Option<OptionType>,
    /// Strategy preference.
    #[serde(default)]
    pub preference: StrategyPreference,
    /// Risk tolerance.
    #[serde(default)]
    pub risk_tolerance: RiskTolerance,
    /// Underlying price known by the caller.
    #[serde(default)]
    pub underlying_price: Option<Decimal>,
    /// Date DTE is measured from; today (UTC) when absent.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl ExplainOptionRequest {
    /// Look a contract up by its symbol.
    #[must_use]
    pub fn by_symbol(
        symbol: impl Into<String>,
        expiration: impl Into<String>,
        contract_symbol: impl Into<String>,
    ) -> Self {
        Self {
            contract_symbol: Some(contract_symbol.into().trim().to_uppercase()),
            ..Self::bare(symbol.into(), expiration.into())
        }
    }

    /// Look a contract up by strike and type.
    #[must_use]
    pub fn by_strike(
        symbol: impl Into<String>,
        expiration: impl Into<String>,
        strike: Decimal,
        option_type: OptionType,
    ) -> Self {
        Self {
            strike: Some(strike),
            option_type: Some(option_type),
            ..Self::bare(symbol.into(), expiration.into())
        }
    }

    fn bare(symbol: String, expiration: String) -> Self {
        Self {
            symbol: symbol.trim().to_uppercase(),
            expiration: expiration.trim().to_string(),
            contract_symbol: None,
            strike: None,
            option_type: None,
            preference: StrategyPreference::default(),
            risk_tolerance: RiskTolerance::default(),
            underlying_price: None,
            as_of: None,
        }
    }

    /// Set the strategy preference.
    #[must_use]
    pub const fn with_preference(mut self, preference: StrategyPreference) -> Self {
        self.preference = preference;
        self
    }

    /// Set the risk tolerance.
    #[must_use]
    pub const fn with_risk_tolerance(mut self, risk_tolerance: RiskTolerance) -> Self {
        self.risk_tolerance = risk_tolerance;
        self
    }

    /// Pin the date DTE is measured from.
    #[must_use]
    pub const fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Set a known underlying price.
    #[must_use]
    pub const fn with_underlying_price(mut self, price: Decimal) -> Self {
        self.underlying_price = Some(price);
        self
    }

    /// Parsed expiration date, when well-formed.
    #[must_use]
    pub fn expiration_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.expiration, "%Y-%m-%d").ok()
    }

    /// Caller-supplied price, if positive.
    #[must_use]
    pub fn known_price(&self) -> Option<Decimal> {
        self.underlying_price.filter(|price| *price > Decimal::ZERO)
    }

    /// Human-readable description of the contract being looked up.
    #[must_use]
    pub fn describe_target(&self) -> String {
        match (&self.contract_symbol, self.strike, self.option_type) {
            (Some(symbol), _, _) => symbol.clone(),
            (None, Some(strike), Some(option_type)) => {
                format!("{} {} {} {}", self.symbol, self.expiration, strike, option_type)
            }
            (None, Some(strike), None) => format!("{} {} {}", self.symbol, self.expiration, strike),
            _ => format!("{} {}", self.symbol, self.expiration),
        }
    }
}

/// Deep analysis of one contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainOptionResult {
    /// Correlation ID for logs.
    pub analysis_id: Uuid,
    /// Underlying price used for moneyness.
    pub underlying_price: Option<Decimal>,
    /// The explained contract.
    pub recommendation: EnrichedRecommendation,
}
