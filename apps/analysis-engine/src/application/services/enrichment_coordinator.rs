//! Enrichment Coordinator
//!
//! Attaches an explanation to every selected candidate, exactly one provider
//! attempt per item, through a bounded pool with a per-item timeout.
//!
//! - Up to `concurrency` calls run at once; a slow item never holds up the rest
//! - Output order always matches input order, whatever order calls finish in
//! - A timeout cancels only that item's call
//! - Any provider error or timeout falls back to a rule-based explanation
//! - Quota or rate-limit errors trip the [`ProviderGate`]; later items skip
//!   the provider until the cooldown passes

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::time::Instant;

use super::explainer::{AiExplainer, Explainer, ExplainerSelection, RuleBasedExplainer};
use super::provider_gate::{DEFAULT_COOLDOWN, ProviderGate};
use crate::application::ports::ExplanationProviderPort;
use crate::domain::recommendation::{
    Enrichment, EnrichmentStatus, ExplanationContext, ScoredCandidate,
};
use crate::observability;

/// Pool size and timeouts for enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorSettings {
    /// Maximum concurrent provider calls.
    pub concurrency: usize,
    /// Per-item timeout for batch enrichment.
    pub item_timeout: Duration,
    /// Timeout for single-contract deep analysis.
    pub deep_analysis_timeout: Duration,
    /// How long a quota trip keeps the provider disabled.
    pub cooldown: Duration,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            concurrency: 3,
            item_timeout: Duration::from_secs(25),
            deep_analysis_timeout: Duration::from_secs(15),
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

/// Bounded, fault-tolerant enrichment.
pub struct EnrichmentCoordinator<P>
where
    P: ExplanationProviderPort,
{
    ai: AiExplainer<P>,
    rules: RuleBasedExplainer,
    gate: ProviderGate,
    settings: CoordinatorSettings,
}

impl<P> EnrichmentCoordinator<P>
where
    P: ExplanationProviderPort,
{
    /// Create a coordinator over a provider.
    pub fn new(provider: Arc<P>, settings: CoordinatorSettings) -> Self {
        Self {
            ai: AiExplainer::new(provider),
            rules: RuleBasedExplainer::new(),
            gate: ProviderGate::new(settings.cooldown),
            settings,
        }
    }

    /// The provider gate.
    pub const fn gate(&self) -> &ProviderGate {
        &self.gate
    }

    /// Coordinator settings.
    pub const fn settings(&self) -> &CoordinatorSettings {
        &self.settings
    }

    /// Explainer choice for the next item.
    pub fn select(&self) -> ExplainerSelection {
        ExplainerSelection::choose(self.ai.is_available(), self.gate.allows_calls())
    }

    /// Enrich a batch. Returns one pair per input, in input order.
    pub async fn enrich(
        &self,
        candidates: Vec<ScoredCandidate>,
        context: &ExplanationContext,
    ) -> Vec<(ScoredCandidate, Enrichment)> {
        let timeout = self.settings.item_timeout;
        let concurrency = self.settings.concurrency.max(1);

        let mut completed: Vec<(usize, ScoredCandidate, Enrichment)> =
            stream::iter(candidates.into_iter().enumerate())
                .map(|(index, candidate)| async move {
                    let enrichment = self.enrich_one(&candidate, context, timeout).await;
                    (index, candidate, enrichment)
                })
                .buffer_unordered(concurrency)
                .collect()
                .await;

        completed.sort_unstable_by_key(|(index, _, _)| *index);
        completed
            .into_iter()
            .map(|(_, candidate, enrichment)| (candidate, enrichment))
            .collect()
    }

    /// Enrich a single candidate with the deep-analysis timeout.
    pub async fn enrich_single(
        &self,
        candidate: &ScoredCandidate,
        context: &ExplanationContext,
    ) -> Enrichment {
        self.enrich_one(candidate, context, self.settings.deep_analysis_timeout)
            .await
    }

    async fn enrich_one(
        &self,
        candidate: &ScoredCandidate,
        context: &ExplanationContext,
        timeout: Duration,
    ) -> Enrichment {
        let explainer: &dyn Explainer = match self.select() {
            ExplainerSelection::Ai => &self.ai,
            ExplainerSelection::RuleBased => &self.rules,
        };

        let started = Instant::now();
        let outcome = tokio::time::timeout(timeout, explainer.explain(candidate, context)).await;
        let elapsed = started.elapsed().as_secs_f64();

        let enrichment = match outcome {
            Ok(Ok(enrichment)) => enrichment,
            Ok(Err(error)) => {
                if error.is_quota_signal() {
                    self.gate.trip(error.kind());
                }
                tracing::warn!(
                    symbol = %candidate.symbol(),
                    error = %error,
                    "Explanation failed, using rule-based fallback"
                );
                self.rules
                    .fallback(candidate, context, EnrichmentStatus::Failure)
            }
            Err(_) => {
                tracing::warn!(
                    symbol = %candidate.symbol(),
                    timeout_secs = timeout.as_secs_f64(),
                    "Explanation timed out, using rule-based fallback"
                );
                self.rules
                    .fallback(candidate, context, EnrichmentStatus::Timeout)
            }
        };

        observability::record_enrichment_item(
            &enrichment.source().to_string(),
            enrichment.status.as_str(),
            elapsed,
        );
        enrichment
    }
}
