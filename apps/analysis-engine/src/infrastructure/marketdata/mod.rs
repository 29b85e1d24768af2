//! Market data adapters.

mod in_memory;
mod json_snapshot;

pub use in_memory::InMemoryMarketData;
pub use json_snapshot::{JsonSnapshotMarketData, parse_chain_document};
