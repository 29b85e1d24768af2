//! Chain Normalizer Domain Service
//!
//! Resolves provider field aliases, coerces numerics, and drops malformed
//! records. A bad record never fails the batch.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::domain::option_chain::errors::MalformedRecord;
use crate::domain::option_chain::value_objects::{
    ContractQuote, NormalizedContract, OptionGreeks, OptionType, RawContract, field_aliases,
};

/// Default premium ceiling; anything above is treated as an equity price.
pub const DEFAULT_SANITY_CEILING: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Accepted and rejected counts for one normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationReport {
    /// Records received.
    pub total: usize,
    /// Records accepted.
    pub accepted: usize,
    /// Records dropped because the contract type was unresolved.
    pub rejected_missing_type: usize,
    /// Records dropped by the premium sanity ceiling.
    pub rejected_implausible_premium: usize,
}

impl NormalizationReport {
    /// Total rejected records.
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.rejected_missing_type + self.rejected_implausible_premium
    }

    fn record(&mut self, rejection: &MalformedRecord) {
        match rejection {
            MalformedRecord::MissingContractType { .. } => self.rejected_missing_type += 1,
            MalformedRecord::ImplausiblePremium { .. } => self.rejected_implausible_premium += 1,
        }
    }
}

/// Output of a normalization pass.
#[derive(Debug, Clone, Default)]
pub struct NormalizedChain {
    /// Accepted contracts, in input order.
    pub contracts: Vec<NormalizedContract>,
    /// Dropped records with their reasons, in input order.
    pub rejections: Vec<MalformedRecord>,
    /// Counts.
    pub report: NormalizationReport,
}

/// Chain normalizer.
#[derive(Debug, Clone)]
pub struct ChainNormalizer {
    sanity_ceiling: Decimal,
}

impl Default for ChainNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_SANITY_CEILING)
    }
}

impl ChainNormalizer {
    /// Create a normalizer with a premium sanity ceiling.
    #[must_use]
    pub const fn new(sanity_ceiling: Decimal) -> Self {
        Self { sanity_ceiling }
    }

    /// Get the sanity ceiling.
    #[must_use]
    pub const fn sanity_ceiling(&self) -> Decimal {
        self.sanity_ceiling
    }

    /// Normalize a batch of raw records.
    ///
    /// `default_expiration` fills records that omit their expiration (chains
    /// fetched for a single expiration often do).
    #[must_use]
    pub fn normalize(
        &self,
        records: Vec<RawContract>,
        default_expiration: Option<NaiveDate>,
    ) -> NormalizedChain {
        let mut chain = NormalizedChain {
            contracts: Vec::with_capacity(records.len()),
            rejections: Vec::new(),
            report: NormalizationReport {
                total: records.len(),
                ..Default::default()
            },
        };

        for record in &records {
            match self.normalize_record(record, default_expiration) {
                Ok(contract) => chain.contracts.push(contract),
                Err(rejection) => {
                    chain.report.record(&rejection);
                    chain.rejections.push(rejection);
                }
            }
        }

        chain.report.accepted = chain.contracts.len();
        chain
    }

    /// Normalize a single record.
    pub fn normalize_record(
        &self,
        record: &RawContract,
        default_expiration: Option<NaiveDate>,
    ) -> Result<NormalizedContract, MalformedRecord> {
        let quote = resolve_quote(record, default_expiration);

        let premium = quote.max_premium();
        if premium > self.sanity_ceiling {
            return Err(MalformedRecord::ImplausiblePremium {
                symbol: quote.symbol,
                premium,
                ceiling: self.sanity_ceiling,
            });
        }

        let symbol = quote.symbol.clone();
        NormalizedContract::from_quote(quote)
            .ok_or(MalformedRecord::MissingContractType { symbol })
    }
}

/// Resolve every logical field through its alias list.
#[must_use]
pub fn resolve_quote(record: &RawContract, default_expiration: Option<NaiveDate>) -> ContractQuote {
    let raw_symbol = record.text(field_aliases::SYMBOL);

    let option_type = record
        .text(field_aliases::CONTRACT_TYPE)
        .and_then(|value| OptionType::parse(&value))
        .or_else(|| raw_symbol.as_deref().and_then(OptionType::from_occ_symbol));

    let underlying = record
        .text(field_aliases::UNDERLYING)
        .unwrap_or_default()
        .to_ascii_uppercase();
    let strike = record
        .decimal(field_aliases::STRIKE)
        .unwrap_or(Decimal::ZERO);
    let expiration = record
        .text(field_aliases::EXPIRATION)
        .and_then(|value| parse_expiration(&value))
        .or(default_expiration);

    let symbol = raw_symbol.unwrap_or_else(|| {
        synthesize_symbol(&underlying, expiration, option_type, strike)
    });

    ContractQuote {
        symbol,
        underlying,
        option_type,
        strike,
        expiration,
        bid: premium(record, field_aliases::BID),
        ask: premium(record, field_aliases::ASK),
        last: premium(record, field_aliases::LAST),
        volume: count(record, field_aliases::VOLUME),
        open_interest: count(record, field_aliases::OPEN_INTEREST),
        greeks: resolve_greeks(record),
    }
}

fn premium(record: &RawContract, aliases: &[&str]) -> Decimal {
    record
        .decimal(aliases)
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}

fn count(record: &RawContract, aliases: &[&str]) -> u64 {
    record
        .number(aliases)
        .filter(|value| *value > 0.0)
        .map_or(0, |value| value.round() as u64)
}

/// Greeks may be nested (`greeks: {...}`) or flattened onto the record.
fn resolve_greeks(record: &RawContract) -> OptionGreeks {
    let nested = record.greeks();
    let source = nested.as_ref().unwrap_or(record);
    let read = |aliases: &[&str]| {
        source
            .number(aliases)
            .or_else(|| record.number(aliases))
            .unwrap_or(0.0)
    };

    OptionGreeks {
        delta: read(field_aliases::DELTA),
        gamma: read(field_aliases::GAMMA),
        theta: read(field_aliases::THETA),
        vega: read(field_aliases::VEGA),
        implied_volatility: read(field_aliases::IMPLIED_VOLATILITY),
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time component.
fn parse_expiration(value: &str) -> Option<NaiveDate> {
    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Build an OCC-style symbol so every contract has a stable identity.
fn synthesize_symbol(
    underlying: &str,
    expiration: Option<NaiveDate>,
    option_type: Option<OptionType>,
    strike: Decimal,
) -> String {
    let date = expiration.map_or_else(|| "000000".to_string(), |d| d.format("%y%m%d").to_string());
    let code = option_type.map_or('X', OptionType::code);
    let thousandths = (strike * Decimal::ONE_THOUSAND)
        .round()
        .to_u64()
        .unwrap_or(0);
    format!("{underlying}{date}{code}{thousandths:08}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};
    use test_case::test_case;

    fn raw(value: Value) -> RawContract {
        RawContract::from_value(value)
    }

    fn normalizer() -> ChainNormalizer {
        ChainNormalizer::default()
    }

    #[test]
    fn normalizes_canonical_record() {
        let record = raw(json!({
            "symbol": "AAPL250117C00150000",
            "underlying": "aapl",
            "option_type": "call",
            "strike": 150.0,
            "expiration_date": "2025-01-17",
            "bid": 2.10,
            "ask": 2.30,
            "last": 2.20,
            "volume": 340,
            "open_interest": 1200,
            "greeks": {"delta": 0.52, "gamma": 0.04, "theta": -0.08, "vega": 0.15, "mid_iv": 0.27}
        }));

        let contract = normalizer().normalize_record(&record, None).unwrap();

        assert_eq!(contract.symbol, "AAPL250117C00150000");
        assert_eq!(contract.underlying, "AAPL");
        assert_eq!(contract.option_type, OptionType::Call);
        assert_eq!(contract.strike, dec!(150));
        assert_eq!(
            contract.expiration,
            NaiveDate::from_ymd_opt(2025, 1, 17)
        );
        assert_eq!(contract.mid, dec!(2.20));
        assert_eq!(contract.volume, 340);
        assert_eq!(contract.open_interest, 1200);
        assert_eq!(contract.greeks.delta, 0.52);
        assert_eq!(contract.greeks.implied_volatility, 0.27);
    }

    // One case per known provider quirk.
    #[test_case(json!({"type": "put", "strike": 100}), OptionType::Put ; "type field")]
    #[test_case(json!({"contract_type": "call", "strike": 100}), OptionType::Call ; "contract_type field")]
    #[test_case(json!({"put_call": "P", "strike": 100}), OptionType::Put ; "put_call letter")]
    #[test_case(json!({"right": "C", "strike_price": 100}), OptionType::Call ; "right letter")]
    #[test_case(json!({"side": "PUT", "strike": "100"}), OptionType::Put ; "side uppercase")]
    #[test_case(json!({"symbol": "SPY250620C00550000"}), OptionType::Call ; "occ symbol only")]
    fn resolves_contract_type_aliases(record: Value, expected: OptionType) {
        let contract = normalizer().normalize_record(&raw(record), None).unwrap();
        assert_eq!(contract.option_type, expected);
    }

    #[test]
    fn flattened_greeks_are_read() {
        let record = raw(json!({"option_type": "put", "delta": -0.31, "iv": "0.45"}));
        let contract = normalizer().normalize_record(&record, None).unwrap();
        assert_eq!(contract.greeks.delta, -0.31);
        assert_eq!(contract.greeks.implied_volatility, 0.45);
    }

    #[test]
    fn null_and_missing_numerics_become_zero() {
        let record = raw(json!({
            "option_type": "call",
            "bid": null,
            "ask": null,
            "volume": null,
            "greeks": null
        }));
        let contract = normalizer().normalize_record(&record, None).unwrap();
        assert_eq!(contract.bid, Decimal::ZERO);
        assert_eq!(contract.volume, 0);
        assert_eq!(contract.open_interest, 0);
        assert_eq!(contract.greeks, OptionGreeks::default());
    }

    #[test]
    fn unresolved_type_is_dropped() {
        let record = raw(json!({"symbol": "WEIRD", "strike": 100, "bid": 1.0}));
        let err = normalizer().normalize_record(&record, None).unwrap_err();
        assert!(matches!(err, MalformedRecord::MissingContractType { .. }));
    }

    #[test]
    fn equity_price_in_premium_field_is_rejected() {
        // Provider returned the underlying's price instead of a premium.
        let record = raw(json!({
            "option_type": "call",
            "strike": 150,
            "bid": 120.0,
            "ask": 125.0
        }));
        let err = normalizer().normalize_record(&record, None).unwrap_err();
        assert!(matches!(
            err,
            MalformedRecord::ImplausiblePremium { premium, .. } if premium == dec!(125)
        ));
    }

    #[test]
    fn premium_at_ceiling_is_accepted() {
        let record = raw(json!({"option_type": "call", "last": 50}));
        assert!(normalizer().normalize_record(&record, None).is_ok());
    }

    #[test]
    fn missing_expiration_uses_default() {
        let default = NaiveDate::from_ymd_opt(2025, 3, 21);
        let record = raw(json!({"option_type": "call"}));
        let contract = normalizer().normalize_record(&record, default).unwrap();
        assert_eq!(contract.expiration, default);
    }

    #[test]
    fn expiration_with_time_component() {
        let record = raw(json!({"option_type": "call", "expiry": "2025-03-21T20:00:00Z"}));
        let contract = normalizer().normalize_record(&record, None).unwrap();
        assert_eq!(contract.expiration, NaiveDate::from_ymd_opt(2025, 3, 21));
    }

    #[test]
    fn missing_symbol_is_synthesized() {
        let record = raw(json!({
            "root_symbol": "AAPL",
            "option_type": "put",
            "strike": 152.5,
            "expiration_date": "2025-01-17"
        }));
        let contract = normalizer().normalize_record(&record, None).unwrap();
        assert_eq!(contract.symbol, "AAPL250117P00152500");
    }

    #[test]
    fn batch_counts_accepted_and_rejected() {
        let records = vec![
            raw(json!({"option_type": "call", "bid": 1.0, "ask": 1.1})),
            raw(json!({"option_type": "put", "bid": 1.0, "ask": 1.1})),
            raw(json!({"bid": 1.0})),
            raw(json!({"option_type": "call", "bid": 151.0, "ask": 152.0})),
        ];

        let chain = normalizer().normalize(records, None);

        assert_eq!(chain.contracts.len(), 2);
        assert_eq!(
            chain.report,
            NormalizationReport {
                total: 4,
                accepted: 2,
                rejected_missing_type: 1,
                rejected_implausible_premium: 1,
            }
        );
        assert_eq!(chain.report.rejected(), 2);
        assert_eq!(chain.rejections.len(), 2);
    }

    #[test]
    fn empty_batch() {
        let chain = normalizer().normalize(vec![], None);
        assert!(chain.contracts.is_empty());
        assert_eq!(chain.report, NormalizationReport::default());
    }
}
