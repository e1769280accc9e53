//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use govgate_core::error::{GovError, Result};

pub use schema::{
    GatewaySection, GovernanceConfig, LogFormat, LoggingSection, RateLimitMode, RateLimitSection,
    StoreSection,
};

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "GOVGATE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "govgate.yaml";

pub fn load_from_file(path: &str) -> Result<GovernanceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| GovError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GovernanceConfig> {
    let cfg: GovernanceConfig = serde_yaml::from_str(s)
        .map_err(|e| GovError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Config path from `GOVGATE_CONFIG`, else `govgate.yaml`.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}
