//! Relevance Filter Domain Service
//!
//! Bounds an arbitrarily large chain to a fixed-size, near-the-money
//! candidate set, split evenly between calls and puts.

use rust_decimal::Decimal;

use crate::domain::option_chain::value_objects::NormalizedContract;

/// Default candidate cap.
pub const DEFAULT_RELEVANCE_CAP: usize = 50;

/// Default moneyness band (±20% of the underlying).
pub const DEFAULT_MONEYNESS_BAND: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Relevance filter.
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    cap: usize,
    band: Decimal,
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_RELEVANCE_CAP, DEFAULT_MONEYNESS_BAND)
    }
}

impl RelevanceFilter {
    /// Create a filter with a cap and a fractional strike band.
    #[must_use]
    pub const fn new(cap: usize, band: Decimal) -> Self {
        Self { cap, band }
    }

    /// Get the cap.
    #[must_use]
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Bound the chain to at most `cap` contracts.
    ///
    /// Chains already within the cap are returned unchanged. Otherwise strikes
    /// outside the band are dropped, and if still over the cap the closest
    /// strikes are taken from each side. Without a usable underlying price the
    /// chain is truncated by count, split evenly between calls and puts.
    #[must_use]
    pub fn filter(
        &self,
        contracts: Vec<NormalizedContract>,
        underlying_price: Option<Decimal>,
    ) -> Vec<NormalizedContract> {
        if contracts.len() <= self.cap {
            return contracts;
        }

        let (mut calls, mut puts): (Vec<_>, Vec<_>) =
            contracts.into_iter().partition(NormalizedContract::is_call);

        let Some(price) = underlying_price.filter(|p| *p > Decimal::ZERO) else {
            return self.take_balanced(calls, puts);
        };

        let lower = price - price * self.band;
        let upper = price + price * self.band;
        let in_band = |c: &NormalizedContract| c.strike >= lower && c.strike <= upper;
        calls.retain(in_band);
        puts.retain(in_band);

        if calls.len() + puts.len() <= self.cap {
            calls.append(&mut puts);
            return calls;
        }

        let by_distance = |a: &NormalizedContract, b: &NormalizedContract| {
            a.distance_from(price)
                .cmp(&b.distance_from(price))
                .then_with(|| a.symbol.cmp(&b.symbol))
        };
        calls.sort_by(by_distance);
        puts.sort_by(by_distance);

        self.take_balanced(calls, puts)
    }

    /// Take `cap / 2` from each side, handing any unused share to the other.
    fn take_balanced(
        &self,
        mut calls: Vec<NormalizedContract>,
        mut puts: Vec<NormalizedContract>,
    ) -> Vec<NormalizedContract> {
        let call_share = self.cap / 2;
        let take_calls = calls
            .len()
            .min(call_share.max(self.cap.saturating_sub(puts.len())));
        let take_puts = puts.len().min(self.cap - take_calls);

        calls.truncate(take_calls);
        puts.truncate(take_puts);
        calls.append(&mut puts);
        calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::option_chain::value_objects::{ContractQuote, OptionType};
    use rust_decimal_macros::dec;

    fn contract(option_type: OptionType, strike: Decimal, index: usize) -> NormalizedContract {
        let symbol = format!("XYZ{}{index:05}", option_type.code());
        NormalizedContract::from_quote(
            ContractQuote::new(symbol, "XYZ", option_type, strike).with_quote(dec!(1), dec!(1.1)),
        )
        .unwrap()
    }

    /// `calls` calls and `puts` puts with strikes stepping up from 100 by 0.25.
    fn chain(calls: usize, puts: usize) -> Vec<NormalizedContract> {
        let mut out = Vec::new();
        for i in 0..calls {
            out.push(contract(OptionType::Call, dec!(100) + Decimal::from(i) * dec!(0.25), i));
        }
        for i in 0..puts {
            out.push(contract(OptionType::Put, dec!(100) + Decimal::from(i) * dec!(0.25), i));
        }
        out
    }

    fn split(contracts: &[NormalizedContract]) -> (usize, usize) {
        let calls = contracts.iter().filter(|c| c.is_call()).count();
        (calls, contracts.len() - calls)
    }

    #[test]
    fn within_cap_is_unchanged() {
        let input = chain(10, 10);
        let output = RelevanceFilter::default().filter(input.clone(), Some(dec!(150)));
        assert_eq!(output, input);
    }

    #[test]
    fn large_chain_is_bounded_and_balanced() {
        // 600 calls / 400 puts, strikes 100..250 around an underlying of 150.
        let output = RelevanceFilter::default().filter(chain(600, 400), Some(dec!(150)));

        assert!(output.len() <= 50);
        assert_eq!(split(&output), (25, 25));
    }

    #[test]
    fn keeps_strikes_closest_to_the_money() {
        let output = RelevanceFilter::default().filter(chain(600, 400), Some(dec!(150)));

        for c in &output {
            assert!(c.distance_from(dec!(150)) <= dec!(3.25), "{} too far", c.strike);
        }
    }

    #[test]
    fn band_drops_far_strikes_before_capping() {
        let mut input = chain(40, 0);
        for i in 0..40 {
            input.push(contract(OptionType::Put, dec!(500) + Decimal::from(i), i));
        }

        let output = RelevanceFilter::default().filter(input, Some(dec!(105)));

        // All puts at 500+ are far outside ±20% of 105.
        assert_eq!(split(&output).1, 0);
        assert!(output.len() <= 50);
    }

    #[test]
    fn unused_share_goes_to_other_side() {
        let output = RelevanceFilter::new(50, dec!(0.20)).filter(chain(100, 10), None);
        assert_eq!(split(&output), (40, 10));
    }

    #[test]
    fn unknown_price_truncates_by_count() {
        let output = RelevanceFilter::default().filter(chain(600, 400), None);
        assert_eq!(split(&output), (25, 25));
        // Input order is preserved per side.
        assert_eq!(output[0].strike, dec!(100));
    }

    #[test]
    fn zero_price_is_unknown() {
        let output = RelevanceFilter::default().filter(chain(60, 60), Some(Decimal::ZERO));
        assert_eq!(split(&output), (25, 25));
    }

    #[test]
    fn odd_cap_never_exceeded() {
        let output = RelevanceFilter::new(7, dec!(0.20)).filter(chain(30, 30), Some(dec!(104)));
        assert_eq!(output.len(), 7);
    }
}
