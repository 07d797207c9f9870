//! Loading [`SimConfig`] from JSON.

use std::path::Path;

use greenfield_logic::config::{validate_config, SimConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Parse and validate a config. Missing fields take their defaults.
pub fn config_from_json(json: &str) -> Result<SimConfig, ConfigError> {
    let config: SimConfig = serde_json::from_str(json)?;
    let errors = validate_config(&config);
    if errors.is_empty() {
        Ok(config)
    } else {
        Err(ConfigError::Invalid(errors))
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<SimConfig, ConfigError> {
    let json = std::fs::read_to_string(path)?;
    config_from_json(&json)
}
