//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for API boundaries and use case inputs/outputs.

mod analysis_dto;

pub use analysis_dto::{AnalysisRequest, AnalysisResult, ExplainOptionRequest, ExplainOptionResult};
