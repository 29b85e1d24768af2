//! Rule-Based Explanation
//!
//! Deterministic rationale built from a candidate's Greeks, moneyness,
//! time to expiration, liquidity and spread. Used whenever the external
//! explanation provider is skipped, times out or fails.

use crate::domain::recommendation::value_objects::{
    ExplanationContext, ScoredCandidate, StrategyPreference,
};

const TIGHT_SPREAD_PERCENT: f64 = 5.0;
const WIDE_SPREAD_PERCENT: f64 = 15.0;
const ACTIVE_VOLUME: u64 = 100;
const DEEP_OPEN_INTEREST: u64 = 500;

/// Builds explanations without any external call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedExplanation;

impl RuleBasedExplanation {
    /// Explain a scored candidate.
    #[must_use]
    pub fn explain(&self, candidate: &ScoredCandidate, context: &ExplanationContext) -> String {
        let contract = &candidate.contract;
        let mut sentences = Vec::with_capacity(5);

        let expiry = contract
            .expiration
            .map_or_else(|| "an unknown date".to_string(), |date| date.to_string());
        sentences.push(format!(
            "{} {} {} expiring {} ({} DTE).",
            contract.underlying,
            contract.strike.normalize(),
            contract.option_type,
            expiry,
            candidate.days_to_expiration,
        ));

        if let (Some(moneyness), Some(price)) = (
            contract.moneyness(context.underlying_price),
            context.underlying_price,
        ) {
            sentences.push(format!(
                "The contract is {} with the underlying at ${}.",
                moneyness.phrase(),
                price.round_dp(2),
            ));
        }

        let greeks = &contract.greeks;
        sentences.push(format!(
            "Delta {:.2} {} for the {} preference; theta {:.3} per day, IV {:.1}%.",
            greeks.delta,
            delta_fit_phrase(candidate.breakdown.delta_fit),
            context.preference,
            greeks.theta,
            greeks.implied_volatility * 100.0,
        ));

        sentences.push(format!(
            "{} with volume {} and open interest {}; {} at {:.1}%.",
            liquidity_phrase(contract.volume, contract.open_interest),
            contract.volume,
            contract.open_interest,
            spread_phrase(contract.spread_percent),
            contract.spread_percent,
        ));

        sentences.push(format!(
            "Score {:.2} ({}). {}",
            candidate.base_score,
            candidate.category,
            preference_note(context.preference),
        ));

        sentences.join(" ")
    }
}

fn delta_fit_phrase(delta_fit: f64) -> &'static str {
    if delta_fit >= 0.2 {
        "is close to target"
    } else if delta_fit > 0.0 {
        "is near target"
    } else {
        "is far from target"
    }
}

fn liquidity_phrase(volume: u64, open_interest: u64) -> &'static str {
    match (volume >= ACTIVE_VOLUME, open_interest >= DEEP_OPEN_INTEREST) {
        (true, true) => "Actively traded and deep",
        (true, false) => "Actively traded",
        (false, true) => "Deep open interest",
        (false, false) => "Thinly traded",
    }
}

fn spread_phrase(spread_percent: f64) -> &'static str {
    if spread_percent <= TIGHT_SPREAD_PERCENT {
        "tight spread"
    } else if spread_percent <= WIDE_SPREAD_PERCENT {
        "moderate spread"
    } else {
        "wide spread"
    }
}

const fn preference_note(preference: StrategyPreference) -> &'static str {
    match preference {
        StrategyPreference::Income | StrategyPreference::Conservative => {
            "Shorter-dated, lower-delta contracts favor premium collection."
        }
        StrategyPreference::Balanced => {
            "Mid-range delta and expiry balance premium against directional exposure."
        }
        StrategyPreference::Growth | StrategyPreference::Aggressive => {
            "Longer-dated, higher-delta contracts favor directional upside."
        }
    }
}
