//! Application Ports (Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! Both are secondary/outbound: market data in, explanations in.

mod explanation_provider_port;
mod market_data_port;

pub use explanation_provider_port::{
    DisabledProvider, ExplanationPayload, ExplanationProviderError, ExplanationProviderPort,
    ProviderExplanation,
};
pub use market_data_port::{MarketDataError, MarketDataPort};
