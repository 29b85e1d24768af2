//! Option Chain Domain Services

mod chain_normalizer;
mod relevance_filter;

pub use chain_normalizer::{
    ChainNormalizer, DEFAULT_SANITY_CEILING, NormalizationReport, NormalizedChain, resolve_quote,
};
pub use relevance_filter::{DEFAULT_MONEYNESS_BAND, DEFAULT_RELEVANCE_CAP, RelevanceFilter};
