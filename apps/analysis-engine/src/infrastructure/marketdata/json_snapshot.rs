//! JSON snapshot market data adapter.
//!
//! Reads provider chain dumps from a directory, one file per chain:
//! `{dir}/{SYMBOL}_{EXPIRATION}.json`. Accepted document shapes:
//!
//! - a top-level array of contracts
//! - an object with an `options` array, `options.option` array (Tradier),
//!   `data` array, or `results` array (Polygon)
//!
//! An `underlying_price` (or `underlyingPrice`) field on the document is
//! cached and served by `get_underlying_price`. A `{SYMBOL}.json` quote file
//! with a `price` or `last` field is consulted when no chain has been read.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::application::ports::{MarketDataError, MarketDataPort};
use crate::domain::option_chain::RawContract;

const PRICE_FIELDS: &[&str] = &["underlying_price", "underlyingPrice", "price", "last"];

/// Market data read from JSON files.
#[derive(Debug)]
pub struct JsonSnapshotMarketData {
    dir: PathBuf,
    prices: RwLock<HashMap<String, Decimal>>,
}

impl JsonSnapshotMarketData {
    /// Create an adapter over a snapshot directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prices: RwLock::new(HashMap::new()),
        }
    }

    /// Snapshot directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn chain_path(&self, symbol: &str, expiration: &str) -> Result<PathBuf, MarketDataError> {
        check_file_component(symbol)?;
        check_file_component(expiration)?;
        Ok(self
            .dir
            .join(format!("{}_{}.json", symbol.to_uppercase(), expiration)))
    }

    fn quote_path(&self, symbol: &str) -> Result<PathBuf, MarketDataError> {
        check_file_component(symbol)?;
        Ok(self.dir.join(format!("{}.json", symbol.to_uppercase())))
    }

    fn cache_price(&self, symbol: &str, price: Decimal) {
        self.prices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(symbol.to_uppercase(), price);
    }

    fn cached_price(&self, symbol: &str) -> Option<Decimal> {
        self.prices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&symbol.to_uppercase())
            .copied()
    }
}

/// Reject values that would leave the snapshot directory.
fn check_file_component(value: &str) -> Result<(), MarketDataError> {
    if value.contains(['/', '\\']) || value.contains("..") {
        return Err(MarketDataError::SymbolNotFound {
            symbol: value.to_string(),
        });
    }
    Ok(())
}

async fn read_document(path: &Path, symbol: &str) -> Result<Option<Value>, MarketDataError> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(MarketDataError::DataUnavailable {
                message: format!("{}: {e}", path.display()),
            });
        }
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| MarketDataError::ApiError {
            message: format!("{symbol}: invalid JSON in {}: {e}", path.display()),
        })
}

/// Split a chain document into contracts and an optional underlying price.
#[must_use]
pub fn parse_chain_document(document: Value) -> (Vec<RawContract>, Option<Decimal>) {
    let price = document_price(&document);

    let records = match document {
        Value::Array(items) => items,
        Value::Object(mut fields) => {
            let options = fields.remove("options").map(|options| match options {
                Value::Object(mut inner) => inner.remove("option").unwrap_or(Value::Null),
                other => other,
            });
            match options
                .or_else(|| fields.remove("data"))
                .or_else(|| fields.remove("results"))
            {
                Some(Value::Array(items)) => items,
                // Tradier returns a bare object for single-contract chains
                Some(item @ Value::Object(_)) => vec![item],
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    };

    (
        records.into_iter().map(RawContract::from_value).collect(),
        price,
    )
}

fn document_price(document: &Value) -> Option<Decimal> {
    PRICE_FIELDS
        .iter()
        .find_map(|field| document.get(*field))
        .and_then(|value| match value {
            Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
            Value::String(s) => s.trim().parse::<Decimal>().ok(),
            _ => None,
        })
        .filter(|price| *price > Decimal::ZERO)
}

#[async_trait]
impl MarketDataPort for JsonSnapshotMarketData {
    async fn get_option_chain(
        &self,
        symbol: &str,
        expiration: &str,
    ) -> Result<Vec<RawContract>, MarketDataError> {
        let path = self.chain_path(symbol, expiration)?;
        let Some(document) = read_document(&path, symbol).await? else {
            return Err(MarketDataError::SymbolNotFound {
                symbol: format!("{symbol} {expiration}"),
            });
        };

        let (records, price) = parse_chain_document(document);
        if let Some(price) = price {
            self.cache_price(symbol, price);
        }

        tracing::debug!(
            path = %path.display(),
            records = records.len(),
            "Loaded chain snapshot"
        );
        Ok(records)
    }

    async fn get_underlying_price(&self, symbol: &str) -> Result<Option<Decimal>, MarketDataError> {
        if let Some(price) = self.cached_price(symbol) {
            return Ok(Some(price));
        }

        let price = read_document(&self.quote_path(symbol)?, symbol)
            .await?
            .as_ref()
            .and_then(document_price);
        if let Some(price) = price {
            self.cache_price(symbol, price);
        }
        Ok(price)
    }
}
