//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless, deterministic business logic
//!
//! # Bounded Contexts
//!
//! - [`option_chain`]: Raw chain normalization and near-the-money filtering
//! - [`recommendation`]: Scoring, candidate selection, explanations, ranking

pub mod option_chain;
pub mod recommendation;
