//! Recommendation Domain Services

mod base_scorer;
mod candidate_selector;
mod result_assembler;
mod rule_based_explanation;

pub use base_scorer::BaseScorer;
pub use candidate_selector::{
    CandidateSelector, DEFAULT_TOP_K, LiquidityThreshold, contract_order, rank_order,
};
pub use result_assembler::{AssembledResult, DEFAULT_AI_SCORE_WEIGHT, ResultAssembler};
pub use rule_based_explanation::RuleBasedExplanation;
