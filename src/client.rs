//! Shared plumbing for hosted model endpoints
//!
//! The embedding and chat clients talk to either Azure OpenAI deployments or
//! OpenAI-compatible APIs. This module builds their HTTP clients (auth
//! headers, timeouts) and request URLs.

use crate::config::{resolve_api_key, ApiFlavor, ServiceConfig};
use crate::ConfigError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client carrying the service's auth header
///
/// # Returns
///
/// * `Ok(Client)` - Client with default headers and the configured timeout
/// * `Err(GleanerError)` - Missing API key or client construction failure
pub fn build_service_client(config: &ServiceConfig) -> crate::Result<Client> {
    let api_key = resolve_api_key(config)?;

    let (name, raw) = match config.flavor {
        ApiFlavor::Azure => (HeaderName::from_static("api-key"), api_key),
        ApiFlavor::OpenAi => (AUTHORIZATION, format!("Bearer {}", api_key)),
    };
    let mut value = HeaderValue::from_str(&raw).map_err(|_| {
        ConfigError::MissingApiKey(format!(
            "API key for {} contains characters not allowed in a header",
            config.endpoint
        ))
    })?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(name, value);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// Returns the URL for an operation such as `embeddings` or `chat/completions`
///
/// # Examples
///
/// ```
/// use site_gleaner::client::service_url;
/// use site_gleaner::config::{ApiFlavor, ServiceConfig};
///
/// let config = ServiceConfig {
///     flavor: ApiFlavor::Azure,
///     endpoint: "https://res.openai.azure.com/".to_string(),
///     deployment: "embed".to_string(),
///     api_version: Some("2023-05-15".to_string()),
///     api_key: None,
///     api_key_env: None,
///     timeout_secs: 30,
/// };
/// assert_eq!(
///     service_url(&config, "embeddings"),
///     "https://res.openai.azure.com/openai/deployments/embed/embeddings?api-version=2023-05-15"
/// );
/// ```
pub fn service_url(config: &ServiceConfig, operation: &str) -> String {
    let base = config.endpoint.trim_end_matches('/');
    match config.flavor {
        ApiFlavor::Azure => format!(
            "{}/openai/deployments/{}/{}?api-version={}",
            base,
            config.deployment,
            operation,
            config.api_version.as_deref().unwrap_or_default()
        ),
        ApiFlavor::OpenAi => format!("{}/{}", base, operation),
    }
}
