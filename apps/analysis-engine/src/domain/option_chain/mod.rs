//! Option Chain Bounded Context
//!
//! This module turns provider-specific chain records into a canonical shape:
//! - Field-alias resolution and numeric coercion
//! - Premium sanity checks (rejecting price/premium mix-ups)
//! - Bounding large chains to a balanced near-the-money candidate set

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::MalformedRecord;
pub use services::{ChainNormalizer, NormalizationReport, NormalizedChain, RelevanceFilter};
pub use value_objects::{
    ContractQuote, Moneyness, NormalizedContract, OptionGreeks, OptionType, RawContract,
};
