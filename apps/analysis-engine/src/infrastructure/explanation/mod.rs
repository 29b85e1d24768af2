//! Explanation provider adapters.

mod openai;

pub use openai::OpenAiExplanationProvider;
