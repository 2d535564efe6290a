//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::EdgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Names of the environment variables the server reads.
pub mod vars {
    pub const CONFIG_FILE: &str = "EDGE_CONFIG";
    pub const PORT: &str = "PORT";
    pub const HOST: &str = "HOST";
    pub const ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
    pub const ENVIRONMENT: &str = "APP_ENV";
    pub const STATIC_ROOT: &str = "STATIC_ROOT";
    pub const SHUTDOWN_GRACE_SECS: &str = "SHUTDOWN_GRACE_SECS";
    pub const METRICS_ADDRESS: &str = "METRICS_ADDRESS";
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value {value:?} for {var}")]
    Env { var: &'static str, value: String },
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML configuration file. Missing sections fall back to defaults.
pub fn read_config_file(path: &Path) -> Result<EdgeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Build the effective configuration from the process environment.
///
/// Defaults are loaded first, then the TOML file named by `EDGE_CONFIG` if set,
/// then individual variable overrides. The result is validated.
pub fn load_from_env() -> Result<EdgeConfig, ConfigError> {
    load_with(|var| std::env::var(var).ok())
}

/// Same as [`load_from_env`] but with an injectable variable lookup.
pub fn load_with<F>(lookup: F) -> Result<EdgeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match lookup(vars::CONFIG_FILE) {
        Some(path) => read_config_file(Path::new(&path))?,
        None => EdgeConfig::default(),
    };

    let config = apply_env_overrides(base, &lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay environment variables on top of `config`.
pub fn apply_env_overrides<F>(mut config: EdgeConfig, lookup: &F) -> Result<EdgeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup(vars::PORT) {
        config.listener.port = port.trim().parse().map_err(|_| ConfigError::Env {
            var: vars::PORT,
            value: port.clone(),
        })?;
    }

    if let Some(host) = lookup(vars::HOST) {
        config.listener.host = host;
    }

    if let Some(origins) = lookup(vars::ALLOWED_ORIGINS) {
        config.cors.allowed_origins = Some(parse_origin_list(&origins));
    }

    if let Some(environment) = lookup(vars::ENVIRONMENT) {
        config.runtime.environment = Some(environment);
    }

    if let Some(root) = lookup(vars::STATIC_ROOT) {
        config.runtime.static_root = root;
    }

    if let Some(grace) = lookup(vars::SHUTDOWN_GRACE_SECS) {
        config.runtime.shutdown_grace_secs =
            grace.trim().parse().map_err(|_| ConfigError::Env {
                var: vars::SHUTDOWN_GRACE_SECS,
                value: grace.clone(),
            })?;
    }

    if let Some(addr) = lookup(vars::METRICS_ADDRESS) {
        config.observability.metrics_address = Some(addr);
    }

    Ok(config)
}

/// Split a comma-separated origin list, dropping blank entries.
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
