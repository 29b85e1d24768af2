//! In-memory market data for tests and demos.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::application::ports::{MarketDataError, MarketDataPort};
use crate::domain::option_chain::RawContract;

/// Chains and prices held in memory.
///
/// Unknown chains are reported as `SymbolNotFound`; unknown prices as `None`.
#[derive(Debug, Default)]
pub struct InMemoryMarketData {
    chains: RwLock<HashMap<(String, String), Vec<RawContract>>>,
    prices: RwLock<HashMap<String, Decimal>>,
}

impl InMemoryMarketData {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style chain insertion.
    #[must_use]
    pub fn with_chain(self, symbol: &str, expiration: &str, records: Vec<RawContract>) -> Self {
        self.set_chain(symbol, expiration, records);
        self
    }

    /// Builder-style price insertion.
    #[must_use]
    pub fn with_price(self, symbol: &str, price: Decimal) -> Self {
        self.set_price(symbol, price);
        self
    }

    /// Set the chain for a symbol and expiration.
    pub fn set_chain(&self, symbol: &str, expiration: &str, records: Vec<RawContract>) {
        self.chains
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key(symbol, expiration), records);
    }

    /// Set the underlying price for a symbol.
    pub fn set_price(&self, symbol: &str, price: Decimal) {
        self.prices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(symbol.to_uppercase(), price);
    }
}

fn key(symbol: &str, expiration: &str) -> (String, String) {
    (symbol.to_uppercase(), expiration.to_string())
}

#[async_trait]
impl MarketDataPort for InMemoryMarketData {
    async fn get_option_chain(
        &self,
        symbol: &str,
        expiration: &str,
    ) -> Result<Vec<RawContract>, MarketDataError> {
        self.chains
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key(symbol, expiration))
            .cloned()
            .ok_or_else(|| MarketDataError::SymbolNotFound {
                symbol: format!("{symbol} {expiration}"),
            })
    }

    async fn get_underlying_price(&self, symbol: &str) -> Result<Option<Decimal>, MarketDataError> {
        Ok(self
            .prices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&symbol.to_uppercase())
            .copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn returns_stored_chain_and_price() {
        let market = InMemoryMarketData::new()
            .with_chain("spy", "2025-01-17", vec![RawContract::default()])
            .with_price("SPY", dec!(585.25));

        let chain = market.get_option_chain("SPY", "2025-01-17").await.unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(
            market.get_underlying_price("spy").await.unwrap(),
            Some(dec!(585.25))
        );
    }

    #[tokio::test]
    async fn unknown_chain_is_not_found() {
        let market = InMemoryMarketData::new();
        assert!(matches!(
            market.get_option_chain("QQQ", "2025-01-17").await,
            Err(MarketDataError::SymbolNotFound { .. })
        ));
        assert_eq!(market.get_underlying_price("QQQ").await.unwrap(), None);
    }
}
