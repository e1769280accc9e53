use serde::Deserialize;
use govgate_core::error::{GovError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GovernanceConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    pub store: StoreSection,

    #[serde(default)]
    pub rate_limit: RateLimitSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

impl GovernanceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GovError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.store.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Caller-level timeout around one engine evaluation.
    #[serde(default = "default_evaluate_timeout_ms")]
    pub evaluate_timeout_ms: u64,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            evaluate_timeout_ms: default_evaluate_timeout_ms(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if !(10..=30000).contains(&self.evaluate_timeout_ms) {
            return Err(GovError::BadRequest(
                "gateway.evaluate_timeout_ms must be between 10 and 30000".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_evaluate_timeout_ms() -> u64 {
    2000
}

/// Where policy documents come from. Required: an engine without a store
/// is a startup error, not a silent deny-all.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// JSON array of policy documents.
    #[serde(default)]
    pub policies_file: Option<String>,

    /// Load the built-in default policy set before the file.
    #[serde(default)]
    pub seed_defaults: bool,
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.policies_file {
            if path.trim().is_empty() {
                return Err(GovError::BadRequest("store.policies_file must not be empty".into()));
            }
        }
        if self.policies_file.is_none() && !self.seed_defaults {
            return Err(GovError::BadRequest(
                "store must set policies_file or seed_defaults".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitMode {
    /// Declared limits never deny.
    #[default]
    Noop,
    /// Per-process fixed-window counting.
    InMemory,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RateLimitSection {
    #[serde(default)]
    pub mode: RateLimitMode,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    #[serde(default)]
    pub format: LogFormat,
}
