//! Shared application state for the governance gateway.
//!
//! Builds the policy store from config (defaults and/or a policy file), the
//! rate counter, and the engine. Startup errors are explicit (`Result`
//! instead of panic).

use std::sync::Arc;

use govgate_core::clock::{Clock, SystemClock};
use govgate_core::error::Result;
use govgate_core::rate::{NoopCounter, RateCounter};

use crate::config::{GovernanceConfig, RateLimitMode};
use crate::obs::GovernanceMetrics;
use crate::policy::{FixedWindowCounter, PolicyEngine};
use crate::store::{defaults::default_policies, load_policies_file, seed, MemoryStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GovernanceConfig,
    store: Arc<MemoryStore>,
    engine: Arc<PolicyEngine>,
    metrics: Arc<GovernanceMetrics>,
}

impl AppState {
    pub fn new(cfg: GovernanceConfig) -> Result<Self> {
        Self::with_clock(cfg, Arc::new(SystemClock))
    }

    /// Build with an explicit clock (tests pin the hour).
    pub fn with_clock(cfg: GovernanceConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        cfg.validate()?;

        // 1) Policy store
        let store = Arc::new(MemoryStore::new());
        if cfg.store.seed_defaults {
            seed(&store, &default_policies())?;
        }
        if let Some(path) = &cfg.store.policies_file {
            let docs = load_policies_file(path)?;
            seed(&store, &docs)?;
        }
        if store.is_empty() {
            tracing::warn!("policy store is empty; every request will be denied");
        }
        tracing::info!(policies = store.len(), "policy store ready");

        // 2) Rate counter
        let counter: Arc<dyn RateCounter> = match cfg.rate_limit.mode {
            RateLimitMode::Noop => Arc::new(NoopCounter),
            RateLimitMode::InMemory => Arc::new(FixedWindowCounter::new()),
        };

        // 3) Engine
        let metrics = Arc::new(GovernanceMetrics::default());
        let engine = PolicyEngine::new(store.clone())
            .with_clock(clock)
            .with_counter(counter)
            .with_metrics(Arc::clone(&metrics));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                store,
                engine: Arc::new(engine),
                metrics,
            }),
        })
    }

    pub fn cfg(&self) -> &GovernanceConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> Arc<MemoryStore> {
        Arc::clone(&self.inner.store)
    }

    pub fn engine(&self) -> Arc<PolicyEngine> {
        Arc::clone(&self.inner.engine)
    }

    pub fn metrics(&self) -> Arc<GovernanceMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }
}
