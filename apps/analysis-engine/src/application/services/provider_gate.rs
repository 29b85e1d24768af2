//! Provider Gate
//!
//! Remembers that the explanation provider reported rate limiting or quota
//! exhaustion, so the rest of a batch (and later batches, until the
//! cooldown passes) skip it.
//!
//! # State Machine
//!
//! ```text
//! OPEN → TRIPPED (quota or rate-limit error observed)
//! TRIPPED → OPEN (cooldown elapsed, or reset())
//! ```
//!
//! The gate is owned by one coordinator instance. Reads are best-effort:
//! calls already in flight when it trips are allowed to finish.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::observability;

/// Default time the gate stays tripped.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(300);

/// Sticky provider-unavailable flag with a cooldown.
#[derive(Debug)]
pub struct ProviderGate {
    cooldown: Duration,
    tripped_at: Mutex<Option<Instant>>,
}

impl Default for ProviderGate {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl ProviderGate {
    /// Create an open gate.
    #[must_use]
    pub const fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            tripped_at: Mutex::new(None),
        }
    }

    /// Configured cooldown.
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Whether provider calls are currently allowed.
    ///
    /// Clears the trip once the cooldown has elapsed.
    pub fn allows_calls(&self) -> bool {
        let mut tripped_at = self.tripped_at.lock().unwrap_or_else(PoisonError::into_inner);
        match *tripped_at {
            None => true,
            Some(at) if at.elapsed() >= self.cooldown => {
                *tripped_at = None;
                tracing::info!(
                    cooldown_secs = self.cooldown.as_secs(),
                    "Explanation provider cooldown elapsed, re-enabling"
                );
                true
            }
            Some(_) => false,
        }
    }

    /// Whether the gate is tripped (without clearing an expired trip).
    pub fn is_tripped(&self) -> bool {
        self.tripped_at
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Trip the gate. Returns `true` if this call tripped it.
    pub fn trip(&self, reason: &str) -> bool {
        let mut tripped_at = self.tripped_at.lock().unwrap_or_else(PoisonError::into_inner);
        if tripped_at.is_some() {
            return false;
        }
        *tripped_at = Some(Instant::now());
        drop(tripped_at);

        observability::record_provider_trip(reason);
        tracing::warn!(
            reason,
            cooldown_secs = self.cooldown.as_secs(),
            "Explanation provider unavailable, using rule-based explanations"
        );
        true
    }

    /// Clear the trip immediately.
    pub fn reset(&self) {
        *self.tripped_at.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
