//! HTTP fetcher implementation
//!
//! This module handles all page requests for the scraper:
//! - Building the HTTP client with a browser-like user agent and fixed timeout
//! - GET requests for page content
//! - Error classification (status, timeout, connection, other)
//!
//! There are no retries. A failed fetch is reported to the caller, which
//! logs it and carries on without that page.

use crate::config::ScraperConfig;
use crate::state::Page;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a page could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },
}

impl FetchError {
    fn from_reqwest(url: &Url, error: reqwest::Error) -> Self {
        let url = url.to_string();
        if error.is_timeout() {
            FetchError::Timeout { url }
        } else if error.is_connect() {
            FetchError::Connect {
                url,
                message: error.to_string(),
            }
        } else {
            FetchError::Network {
                url,
                message: error.to_string(),
            }
        }
    }
}

/// Source of pages for a scrape
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError>;
}

/// Builds an HTTP client for page fetches
///
/// # Arguments
///
/// * `config` - Scraper configuration (user agent, timeout)
///
/// # Example
///
/// ```no_run
/// use site_gleaner::config::ScraperConfig;
/// use site_gleaner::crawler::build_http_client;
///
/// let client = build_http_client(&ScraperConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ScraperConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// Sends a single GET request
    ///
    /// Any non-2xx status is a failure. The body is returned as text
    /// whatever its declared Content-Type.
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        tracing::debug!("Fetched {} ({} bytes)", url, html.len());
        Ok(Page::new(url.clone(), html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page_url(server: &MockServer, p: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), p)).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&ScraperConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("user-agent", "Mozilla/5.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>Hello.</p>"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&ScraperConfig::default()).unwrap();
        let url = page_url(&server, "/page");
        let page = fetcher.fetch(&url).await.unwrap();

        assert_eq!(page.url, url);
        assert_eq!(page.html, "<p>Hello.</p>");
    }

    #[tokio::test]
    async fn test_fetch_ignores_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("plain text body")
                    .insert_header("content-type", "text/plain"),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&ScraperConfig::default()).unwrap();
        let page = fetcher.fetch(&page_url(&server, "/notes.txt")).await.unwrap();
        assert_eq!(page.html, "plain text body");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&ScraperConfig::default()).unwrap();
        match fetcher.fetch(&page_url(&server, "/missing")).await {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let config = ScraperConfig {
            fetch_timeout_secs: 1,
            ..ScraperConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        assert!(matches!(
            fetcher.fetch(&page_url(&server, "/slow")).await,
            Err(FetchError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Port 9 (discard) is closed on test machines
        let fetcher = HttpFetcher::new(&ScraperConfig::default()).unwrap();
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        assert!(fetcher.fetch(&url).await.is_err());
    }
}
