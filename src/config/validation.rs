use crate::config::types::{
    ApiFlavor, Config, EmbeddingsConfig, ScraperConfig, ServiceConfig, MAX_EMBEDDING_INPUT_CHARS,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_embeddings_config(&config.embeddings)?;
    if let Some(chat) = &config.chat {
        validate_service_config("chat", chat)?;
    }
    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.max_chars < 1 {
        return Err(ConfigError::Validation(format!(
            "max_chars must be >= 1, got {}",
            config.max_chars
        )));
    }

    if config.max_links_to_follow > 100 {
        return Err(ConfigError::Validation(format!(
            "max_links_to_follow must be between 0 and 100, got {}",
            config.max_links_to_follow
        )));
    }

    if config.fetch_timeout_secs < 1 || config.fetch_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be between 1 and 300, got {}",
            config.fetch_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.concurrency < 1 || config.concurrency > 64 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 64, got {}",
            config.concurrency
        )));
    }

    if config.crawl_deadline_secs == Some(0) {
        return Err(ConfigError::Validation(
            "crawl_deadline_secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates embedding endpoint configuration
fn validate_embeddings_config(config: &EmbeddingsConfig) -> Result<(), ConfigError> {
    validate_service_config("embeddings", &config.service)?;

    if config.max_input_chars < 1 || config.max_input_chars > MAX_EMBEDDING_INPUT_CHARS {
        return Err(ConfigError::Validation(format!(
            "max_input_chars must be between 1 and {}, got {}",
            MAX_EMBEDDING_INPUT_CHARS, config.max_input_chars
        )));
    }

    Ok(())
}

/// Validates connection settings shared by the embedding and chat endpoints
fn validate_service_config(section: &str, config: &ServiceConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid {} endpoint '{}': {}", section, config.endpoint, e))
    })?;

    if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} endpoint '{}' must use HTTP or HTTPS",
            section, config.endpoint
        )));
    }

    if config.deployment.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} deployment cannot be empty",
            section
        )));
    }

    if config.deployment.contains('/') {
        return Err(ConfigError::Validation(format!(
            "{} deployment '{}' cannot contain '/'",
            section, config.deployment
        )));
    }

    if config.flavor == ApiFlavor::Azure
        && config
            .api_version
            .as_deref()
            .map_or(true, |v| v.trim().is_empty())
    {
        return Err(ConfigError::Validation(format!(
            "{} api_version is required for the azure flavor",
            section
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "{} timeout_secs must be >= 1, got {}",
            section, config.timeout_secs
        )));
    }

    Ok(())
}
