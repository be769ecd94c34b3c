use crate::config::types::{Config, ServiceConfig};
use crate::config::validation::validate;
use crate::{ConfigError, ConfigResult};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use site_gleaner::config::load_config;
///
/// let config = load_config(Path::new("gleaner.toml")).unwrap();
/// println!("Chunk size: {}", config.scraper.max_chars);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at start-up so two runs can be matched to the same settings.
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Resolves the API key for a service
///
/// An inline `api-key` wins; otherwise the variable named by `api-key-env`
/// is read from the environment.
pub fn resolve_api_key(service: &ServiceConfig) -> ConfigResult<String> {
    if let Some(key) = service.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        return Ok(key.trim().to_string());
    }

    let var = service.api_key_env.as_deref().ok_or_else(|| {
        ConfigError::MissingApiKey(format!(
            "no api-key or api-key-env configured for {}",
            service.endpoint
        ))
    })?;

    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ConfigError::MissingApiKey(format!(
            "environment variable {} is not set",
            var
        ))),
    }
}
