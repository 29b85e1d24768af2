//! OpenAI-compatible chat-completions explanation provider.
//!
//! Sends one candidate per request and asks for a JSON object
//! `{explanation, category, confidence}`. Plain-text answers are accepted
//! as an explanation with no category or confidence.
//!
//! No retries: the coordinator allows exactly one attempt per item, and
//! rate limiting is reported upward so the batch can stop calling.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use crate::application::ports::{
    ExplanationPayload, ExplanationProviderError, ExplanationProviderPort, ProviderExplanation,
};
use crate::config::ExplainerConfig;

const SYSTEM_PROMPT: &str = "You are an options analyst. Explain in two to four sentences why \
the given option contract suits (or does not suit) the investor's strategy preference and risk \
tolerance, referring to its Greeks, moneyness, time to expiration, liquidity and spread. \
Respond with a JSON object: {\"explanation\": string, \"category\": \"Conservative\" | \
\"Balanced\" | \"Aggressive\", \"confidence\": number between 0 and 1}.";

/// Explanation provider over an OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct OpenAiExplanationProvider {
    client: Client,
    enabled: bool,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiExplanationProvider {
    /// Create a provider from config.
    ///
    /// An empty API key yields a provider that reports itself unconfigured.
    pub fn new(config: &ExplainerConfig) -> Result<Self, ExplanationProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ExplanationProviderError::Http {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            enabled: config.enabled,
            api_key: config.api_key.trim().to_string(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Chat-completions endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body(&self, payload: &ExplanationPayload) -> Result<Value, ExplanationProviderError> {
        let contract = serde_json::to_string(payload).map_err(|e| {
            ExplanationProviderError::InvalidResponse {
                message: format!("payload serialization failed: {e}"),
            }
        })?;

        Ok(json!({
            "model": self.model,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "response_format": {"type": "json_object"},
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": contract},
            ],
        }))
    }
}

#[async_trait]
impl ExplanationProviderPort for OpenAiExplanationProvider {
    async fn explain(
        &self,
        payload: &ExplanationPayload,
    ) -> Result<ProviderExplanation, ExplanationProviderError> {
        if !self.is_configured() {
            return Err(ExplanationProviderError::NotConfigured);
        }

        let body = self.request_body(payload)?;
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExplanationProviderError::Timeout
                } else {
                    ExplanationProviderError::Http {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let error_body = response.text().await.unwrap_or_default();
            return Err(categorize_error(status, retry_after, &error_body));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| ExplanationProviderError::InvalidResponse {
                message: e.to_string(),
            })?;

        parse_completion(&json)
    }

    fn is_configured(&self) -> bool {
        self.enabled && !self.api_key.is_empty()
    }
}

/// Map a non-success response to a provider error.
fn categorize_error(
    status: StatusCode,
    retry_after: Option<u64>,
    body: &str,
) -> ExplanationProviderError {
    let error = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").cloned());
    let field = |name: &str| {
        error
            .as_ref()
            .and_then(|e| e.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let code = field("code").or_else(|| field("type")).unwrap_or_default();
    let message = field("message").unwrap_or_else(|| body.to_string());

    if code == "insufficient_quota" {
        return ExplanationProviderError::QuotaExceeded { message };
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => ExplanationProviderError::RateLimited {
            retry_after_secs: retry_after,
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ExplanationProviderError::NotConfigured,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ExplanationProviderError::Timeout
        }
        _ => ExplanationProviderError::Http {
            message: format!("{}: {}", status.as_u16(), message),
        },
    }
}

/// Extract `choices[0].message.content` and interpret it.
fn parse_completion(json: &Value) -> Result<ProviderExplanation, ExplanationProviderError> {
    let content = json
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .ok_or_else(|| ExplanationProviderError::InvalidResponse {
            message: "response is missing choices[0].message.content".to_string(),
        })?;

    parse_content(content)
}

fn parse_content(content: &str) -> Result<ProviderExplanation, ExplanationProviderError> {
    let trimmed = strip_code_fence(content.trim());
    if trimmed.is_empty() {
        return Err(ExplanationProviderError::InvalidResponse {
            message: "empty content".to_string(),
        });
    }

    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(trimmed) else {
        return Ok(ProviderExplanation::text(trimmed));
    };

    let Some(explanation) = fields.get("explanation").and_then(Value::as_str) else {
        return Err(ExplanationProviderError::InvalidResponse {
            message: "JSON content has no explanation".to_string(),
        });
    };

    Ok(ProviderExplanation {
        explanation: explanation.to_string(),
        category: fields
            .get("category")
            .and_then(Value::as_str)
            .map(str::to_string),
        confidence: fields.get("confidence").and_then(Value::as_f64),
    })
}

fn strip_code_fence(content: &str) -> &str {
    content
        .strip_prefix("```json")
        .or_else(|| content.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map_or(content, str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_content() {
        let json = json!({
            "choices": [{"message": {"content":
                "{\"explanation\": \"Good fit.\", \"category\": \"Balanced\", \"confidence\": 0.7}"
            }}]
        });
        let parsed = parse_completion(&json).unwrap();
        assert_eq!(parsed.explanation, "Good fit.");
        assert_eq!(parsed.category.as_deref(), Some("Balanced"));
        assert_eq!(parsed.confidence, Some(0.7));
    }

    #[test]
    fn accepts_fenced_json() {
        let parsed = parse_content("```json\n{\"explanation\": \"Fenced.\"}\n```").unwrap();
        assert_eq!(parsed, ProviderExplanation::text("Fenced."));
    }

    #[test]
    fn falls_back_to_plain_text() {
        let parsed = parse_content("This call is liquid and near the money.").unwrap();
        assert_eq!(parsed.explanation, "This call is liquid and near the money.");
        assert_eq!(parsed.confidence, None);
    }

    #[test]
    fn missing_content_is_invalid() {
        assert!(matches!(
            parse_completion(&json!({"choices": []})),
            Err(ExplanationProviderError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn quota_code_wins_over_status() {
        let body = r#"{"error": {"message": "You exceeded your current quota", "type": "insufficient_quota", "code": "insufficient_quota"}}"#;
        assert!(matches!(
            categorize_error(StatusCode::TOO_MANY_REQUESTS, None, body),
            ExplanationProviderError::QuotaExceeded { .. }
        ));
    }

    #[test]
    fn plain_429_is_rate_limited() {
        assert_eq!(
            categorize_error(StatusCode::TOO_MANY_REQUESTS, Some(12), ""),
            ExplanationProviderError::RateLimited {
                retry_after_secs: Some(12)
            }
        );
    }

    #[test]
    fn server_error_is_transient() {
        let err = categorize_error(StatusCode::BAD_GATEWAY, None, "upstream down");
        assert!(!err.is_quota_signal());
        assert_eq!(err.to_string(), "Explanation provider HTTP error: 502: upstream down");
    }

    #[test]
    fn empty_key_is_unconfigured() {
        let provider = OpenAiExplanationProvider::new(&ExplainerConfig::default()).unwrap();
        assert!(!provider.is_configured());
        assert_eq!(provider.endpoint(), "https://api.openai.com/v1/chat/completions");
    }
}
