//! Option Chain Value Objects

mod contract_quote;
mod greeks;
mod normalized_contract;
mod option_type;
mod raw_contract;

pub use contract_quote::ContractQuote;
pub use greeks::OptionGreeks;
pub use normalized_contract::NormalizedContract;
pub use option_type::{Moneyness, OptionType};
pub use raw_contract::{RawContract, field_aliases};
