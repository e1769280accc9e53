use std::sync::Arc;
use std::time::{Duration, Instant};

use govgate_core::clock::{Clock, SystemClock};
use govgate_core::error::{GovError, Result};
use govgate_core::eval::{decide, Decision, Outcome};
use govgate_core::rate::{NoopCounter, RateCounter};
use govgate_core::Context;

use crate::obs::GovernanceMetrics;
use crate::store::PolicyStore;

/// Metric label for `service`/`intent` when no stored policy backs the pair.
pub const UNKNOWN_LABEL: &str = "_unknown";

/// Store lookup + policy evaluation with a fail-closed boundary.
///
/// Holds no per-call state; construct once and share via `Arc`.
pub struct PolicyEngine {
    store: Arc<dyn PolicyStore>,
    clock: Arc<dyn Clock>,
    counter: Arc<dyn RateCounter>,
    metrics: Arc<GovernanceMetrics>,
}

impl PolicyEngine {
    /// Engine over `store` with the system clock and a no-op rate counter.
    pub fn new(store: Arc<dyn PolicyStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            counter: Arc::new(NoopCounter),
            metrics: Arc::new(GovernanceMetrics::default()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_counter(mut self, counter: Arc<dyn RateCounter>) -> Self {
        self.counter = counter;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<GovernanceMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn metrics(&self) -> Arc<GovernanceMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Decide `(service, intent)` for `context`. Never fails: store faults and
    /// undecodable documents become a generic denial.
    pub fn evaluate(&self, service: &str, intent: &str, context: &Context) -> Decision {
        let started = Instant::now();

        let decision = match self.try_evaluate(service, intent, context) {
            Ok(d) => d,
            Err(e) => {
                let kind = match &e {
                    GovError::MalformedPolicy { .. } => "malformed",
                    _ => "store",
                };
                self.metrics.store_errors.inc(&[("kind", kind)]);
                tracing::error!(%service, %intent, error = %e, "governance evaluation failed");
                Decision::deny(Outcome::EvaluationError)
            }
        };

        self.record(service, intent, &decision, started.elapsed());
        decision
    }

    fn try_evaluate(&self, service: &str, intent: &str, context: &Context) -> Result<Decision> {
        let Some(policy) = self.store.get(service, intent)? else {
            tracing::warn!(%service, %intent, "no policy found");
            return Ok(Decision::deny(Outcome::PolicyNotFound {
                service: service.to_string(),
                intent: intent.to_string(),
            }));
        };

        Ok(decide(&policy, context, self.clock.hour_utc(), self.counter.as_ref()))
    }

    fn record(&self, service: &str, intent: &str, decision: &Decision, elapsed: Duration) {
        // Only stored policies get their own series; callers choose the pair.
        let (svc_label, intent_label) = match decision.outcome() {
            Outcome::PolicyNotFound { .. } | Outcome::EvaluationError => {
                (UNKNOWN_LABEL, UNKNOWN_LABEL)
            }
            _ => (service, intent),
        };
        self.metrics.evaluations.inc(&[
            ("service", svc_label),
            ("intent", intent_label),
            ("outcome", decision.outcome().label()),
        ]);
        self.metrics
            .evaluation_duration
            .observe(&[("service", svc_label), ("intent", intent_label)], elapsed);

        tracing::info!(
            %service,
            %intent,
            allowed = decision.allowed(),
            duration = %format!("{:.3}s", elapsed.as_secs_f64()),
            "governance_evaluation"
        );
    }
}
