//! Use Cases
//!
//! Application-specific business rules that orchestrate domain logic.

mod analyze_chain;
mod errors;
mod explain_option;

pub use analyze_chain::AnalyzeChainUseCase;
pub use errors::AnalysisError;
pub use explain_option::ExplainOptionUseCase;
