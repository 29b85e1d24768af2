//! Explainers
//!
//! One capability, two implementations. The AI-backed explainer calls the
//! external provider; the rule-based explainer builds deterministic text
//! locally and never fails. The coordinator picks one per item through
//! [`ExplainerSelection`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{
    ExplanationPayload, ExplanationProviderError, ExplanationProviderPort,
};
use crate::domain::recommendation::{
    Enrichment, EnrichmentStatus, ExplanationContext, RuleBasedExplanation, ScoredCandidate,
};

/// Produces an explanation for a scored candidate.
#[async_trait]
pub trait Explainer: Send + Sync {
    /// Explain one candidate.
    async fn explain(
        &self,
        candidate: &ScoredCandidate,
        context: &ExplanationContext,
    ) -> Result<Enrichment, ExplanationProviderError>;

    /// Whether this explainer can be used at all.
    fn is_available(&self) -> bool;
}

/// Which explainer handles an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplainerSelection {
    /// External provider.
    Ai,
    /// Local rules; the provider is unavailable.
    RuleBased,
}

impl ExplainerSelection {
    /// Choose the provider only when it is configured and not gated.
    #[must_use]
    pub const fn choose(provider_available: bool, gate_allows_calls: bool) -> Self {
        if provider_available && gate_allows_calls {
            Self::Ai
        } else {
            Self::RuleBased
        }
    }
}

/// Explainer backed by an [`ExplanationProviderPort`].
pub struct AiExplainer<P>
where
    P: ExplanationProviderPort,
{
    provider: Arc<P>,
}

impl<P> AiExplainer<P>
where
    P: ExplanationProviderPort,
{
    /// Wrap a provider.
    pub const fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P> Explainer for AiExplainer<P>
where
    P: ExplanationProviderPort,
{
    async fn explain(
        &self,
        candidate: &ScoredCandidate,
        context: &ExplanationContext,
    ) -> Result<Enrichment, ExplanationProviderError> {
        let payload = ExplanationPayload::from_candidate(candidate, context);
        let answer = self.provider.explain(&payload).await?;

        let explanation = answer.explanation.trim();
        if explanation.is_empty() {
            return Err(ExplanationProviderError::InvalidResponse {
                message: "empty explanation".to_string(),
            });
        }

        Ok(Enrichment {
            explanation: explanation.to_string(),
            category_label: answer.category,
            confidence: answer.confidence.filter(|c| c.is_finite()),
            status: EnrichmentStatus::Ai,
        })
    }

    fn is_available(&self) -> bool {
        self.provider.is_configured()
    }
}

/// Deterministic local explainer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedExplainer {
    rules: RuleBasedExplanation,
}

impl RuleBasedExplainer {
    /// Create the rule-based explainer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rules: RuleBasedExplanation,
        }
    }

    /// Rule-based enrichment recording why the provider was not used.
    #[must_use]
    pub fn fallback(
        &self,
        candidate: &ScoredCandidate,
        context: &ExplanationContext,
        status: EnrichmentStatus,
    ) -> Enrichment {
        Enrichment::rule_based(self.rules.explain(candidate, context), status)
    }
}

#[async_trait]
impl Explainer for RuleBasedExplainer {
    async fn explain(
        &self,
        candidate: &ScoredCandidate,
        context: &ExplanationContext,
    ) -> Result<Enrichment, ExplanationProviderError> {
        Ok(self.fallback(candidate, context, EnrichmentStatus::ProviderUnavailable))
    }

    fn is_available(&self) -> bool {
        true
    }
}
