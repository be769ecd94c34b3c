use serde::Deserialize;

/// Main configuration structure for Site-Gleaner
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    pub embeddings: EmbeddingsConfig,
    #[serde(default)]
    pub chat: Option<ServiceConfig>,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ScraperConfig {
    /// Soft upper bound on chunk length, in characters
    pub max_chars: usize,

    /// Number of ranked internal links to visit after the root page
    pub max_links_to_follow: usize,

    /// Per-request timeout for page fetches (seconds)
    pub fetch_timeout_secs: u64,

    /// User-Agent header sent with page fetches
    pub user_agent: String,

    /// Maximum number of fetches or embeddings in flight at once
    pub concurrency: usize,

    /// Embed identical strings once per scrape
    pub cache_embeddings: bool,

    /// Overall deadline for one scrape (seconds); unbounded when absent
    pub crawl_deadline_secs: Option<u64>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_chars: 800,
            max_links_to_follow: 10,
            fetch_timeout_secs: 10,
            user_agent: "Mozilla/5.0".to_string(),
            concurrency: 1,
            cache_embeddings: true,
            crawl_deadline_secs: None,
        }
    }
}

/// Which wire dialect a hosted model endpoint speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiFlavor {
    /// Azure OpenAI: per-deployment URLs, `api-key` header, `api-version` query
    Azure,
    /// OpenAI-compatible: `{endpoint}/{operation}` with a bearer token
    OpenAi,
}

/// Connection settings for a hosted model endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServiceConfig {
    pub flavor: ApiFlavor,

    /// Base URL of the service (e.g. `https://my-resource.openai.azure.com`)
    pub endpoint: String,

    /// Deployment (Azure) or model name (OpenAI); also sent as `model`
    pub deployment: String,

    /// Azure `api-version` query parameter
    #[serde(default)]
    pub api_version: Option<String>,

    /// Inline API key; takes precedence over `api-key-env`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Request timeout (seconds)
    #[serde(default = "default_service_timeout")]
    pub timeout_secs: u64,
}

/// Embedding endpoint settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EmbeddingsConfig {
    #[serde(flatten)]
    pub service: ServiceConfig,

    /// Inputs are truncated to this many characters before sending
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

/// Hard input ceiling of the hosted embedding models
pub const MAX_EMBEDDING_INPUT_CHARS: usize = 8191;

fn default_service_timeout() -> u64 {
    30
}

fn default_max_input_chars() -> usize {
    MAX_EMBEDDING_INPUT_CHARS
}
