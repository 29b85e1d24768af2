//! Application Services
//!
//! Stateful orchestration shared by the use cases:
//! - The synchronous analysis pipeline (normalize, filter, score, select)
//! - Explainers and the bounded enrichment coordinator
//! - The provider gate that remembers quota exhaustion

mod analysis_pipeline;
mod enrichment_coordinator;
mod explainer;
mod provider_gate;

pub use analysis_pipeline::{AnalysisPipeline, PreparedCandidates};
pub use enrichment_coordinator::{CoordinatorSettings, EnrichmentCoordinator};
pub use explainer::{AiExplainer, Explainer, ExplainerSelection, RuleBasedExplainer};
pub use provider_gate::ProviderGate;
