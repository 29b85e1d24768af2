//! Explanation provider configuration (OpenAI-compatible chat completions).

use serde::{Deserialize, Serialize};

use super::default_true;

/// Explanation provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainerConfig {
    /// Whether to call the provider at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// API key (from environment variable).
    #[serde(default)]
    pub api_key: String,
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Chat model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens in the answer.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Transport-level request timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ExplainerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ExplainerConfig {
    /// Enabled and has an API key.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty()
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

const fn default_temperature() -> f32 {
    0.2
}

const fn default_max_tokens() -> u32 {
    300
}

const fn default_request_timeout_secs() -> u64 {
    30
}
