//! Integration tests for the scraper and agent
//!
//! These tests use wiremock for both the website being scraped and the
//! hosted embedding/chat services, and drive the public API end-to-end.

use serde_json::{json, Value};
use site_gleaner::agent::Agent;
use site_gleaner::config::{ApiFlavor, Config, EmbeddingsConfig, ScraperConfig, ServiceConfig};
use site_gleaner::output::NO_CONTENT_MESSAGE;
use site_gleaner::{ConfigError, GleanerError, ScrapeError, Scraper};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Embeds text mentioning "loyal" as [1, 0] and anything else as [0, 1]
struct KeywordEmbeddings;

impl Respond for KeywordEmbeddings {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return ResponseTemplate::new(400),
        };
        let text = body["input"][0].as_str().unwrap_or_default();
        let embedding = if text.contains("loyal") {
            json!([1.0, 0.0])
        } else {
            json!([0.0, 1.0])
        };
        ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "index": 0, "embedding": embedding }]
        }))
    }
}

fn service(server: &MockServer, deployment: &str) -> ServiceConfig {
    ServiceConfig {
        flavor: ApiFlavor::OpenAi,
        endpoint: server.uri(),
        deployment: deployment.to_string(),
        api_version: None,
        api_key: Some("test-key".to_string()),
        api_key_env: None,
        timeout_secs: 5,
    }
}

fn create_test_config(embeddings: &MockServer, max_links: usize) -> Config {
    Config {
        scraper: ScraperConfig {
            max_links_to_follow: max_links,
            fetch_timeout_secs: 5,
            ..ScraperConfig::default()
        },
        embeddings: EmbeddingsConfig {
            service: service(embeddings, "embed-small"),
            max_input_chars: 8191,
        },
        chat: None,
    }
}

async fn mount_page(server: &MockServer, page_path: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn start_embeddings() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(KeywordEmbeddings)
        .mount(&server)
        .await;
    server
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}

/// Mounts a small shelter site and returns its root URL
async fn start_shelter_site(site: &MockServer) -> String {
    mount_page(
        site,
        "/",
        r#"<html><head><title>Shelter</title></head><body>
            <nav><a href="/">Home</a></nav>
            <p>Cats are great pets.</p>
            <a href="/adopt/loyal-friends">Friends</a>
            <a href="/adopt/cat-corner">Cat corner</a>
            <a href="/adopt/loyal-friends">Friends again</a>
            <a href="https://elsewhere.org/loyal-page">Elsewhere</a>
            <footer>Copyright</footer>
        </body></html>"#,
    )
    .await;
    mount_page(
        site,
        "/adopt/loyal-friends",
        "<html><body><p>Our dogs are loyal and friendly.</p></body></html>",
    )
    .await;
    mount_page(
        site,
        "/adopt/cat-corner",
        "<html><body><p>Cats nap all day.</p></body></html>",
    )
    .await;
    format!("{}/", site.uri())
}

#[tokio::test]
async fn test_scrape_follows_most_relevant_link() {
    let site = MockServer::start().await;
    let embeddings = start_embeddings().await;
    let root = start_shelter_site(&site).await;

    let scraper = Scraper::from_config(&create_test_config(&embeddings, 1)).unwrap();
    let report = scraper.scrape(&root, "loyal companions").await.unwrap();

    let best = report.best_match.expect("a chunk should be scored");
    assert_eq!(best.payload.text, "Our dogs are loyal and friendly.");
    assert_eq!(best.payload.source_url, format!("{}/adopt/loyal-friends", site.uri()));
    assert!((best.score - 1.0).abs() < 1e-9);

    assert_eq!(
        requested_paths(&site).await,
        vec!["/".to_string(), "/adopt/loyal-friends".to_string()]
    );
    assert_eq!(report.stats.pages_fetched, 2);
    assert_eq!(report.stats.links_discovered, 3);
}

#[tokio::test]
async fn test_scrape_fetches_each_page_once() {
    let site = MockServer::start().await;
    let embeddings = start_embeddings().await;
    let root = start_shelter_site(&site).await;

    let scraper = Scraper::from_config(&create_test_config(&embeddings, 10)).unwrap();
    scraper.scrape(&root, "loyal companions").await.unwrap();

    let mut paths = requested_paths(&site).await;
    assert_eq!(paths.len(), 3);
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 3);
}

#[tokio::test]
async fn test_scrape_website_cats_and_dogs() {
    let site = MockServer::start().await;
    let embeddings = start_embeddings().await;
    mount_page(
        &site,
        "/",
        "<html><body><p>Cats are great pets. Dogs are loyal too.</p></body></html>",
    )
    .await;

    let scraper = Scraper::from_config(&create_test_config(&embeddings, 10)).unwrap();
    let reply = scraper
        .scrape_website(&format!("{}/", site.uri()), "Which animal is loyal?")
        .await;

    assert_eq!(
        reply,
        "Best match from crawled pages (score 1.00): Cats are great pets. Dogs are loyal too."
    );
}

#[tokio::test]
async fn test_unreachable_root_without_links_reports_no_content() {
    let site = MockServer::start().await;
    let embeddings = start_embeddings().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;

    let scraper = Scraper::from_config(&create_test_config(&embeddings, 10)).unwrap();
    let reply = scraper
        .scrape_website(&format!("{}/missing", site.uri()), "anything")
        .await;

    assert_eq!(reply, NO_CONTENT_MESSAGE);
    assert!(requested_paths(&embeddings).await.is_empty());
}

#[tokio::test]
async fn test_query_embedding_failure_aborts() {
    let site = MockServer::start().await;
    let embeddings = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&embeddings)
        .await;
    let root = start_shelter_site(&site).await;

    let scraper = Scraper::from_config(&create_test_config(&embeddings, 10)).unwrap();
    let result = scraper.scrape(&root, "loyal companions").await;
    assert!(matches!(result, Err(ScrapeError::QueryEmbedding(_))));
    assert_eq!(requested_paths(&site).await, vec!["/".to_string()]);

    let reply = scraper.scrape_website(&root, "loyal companions").await;
    assert!(reply.starts_with("Error: "), "got {}", reply);
    assert!(reply.contains("503"), "got {}", reply);
}

#[tokio::test]
async fn test_agent_dispatches_scrape_tool() {
    let site = MockServer::start().await;
    let embeddings = start_embeddings().await;
    let chat = MockServer::start().await;
    let root = start_shelter_site(&site).await;

    let arguments = json!({ "url": root, "query": "loyal companions" }).to_string();
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": { "name": "scrape_website", "arguments": arguments }
                    }]
                }
            }]
        })))
        .expect(1)
        .mount(&chat)
        .await;

    let mut config = create_test_config(&embeddings, 1);
    config.chat = Some(service(&chat, "gpt-4o"));

    let agent = Agent::from_config(&config).unwrap();
    let reply = agent
        .respond("Which pets are loyal at the shelter?")
        .await
        .unwrap();

    assert_eq!(
        reply,
        "Function `scrape_website` was called:\n\
         Best match from crawled pages (score 1.00): Our dogs are loyal and friendly."
    );
}

#[tokio::test]
async fn test_agent_requires_chat_section() {
    let embeddings = start_embeddings().await;
    let config = create_test_config(&embeddings, 1);
    assert!(Agent::from_config(&config).is_err());
    assert!(matches!(
        site_gleaner::agent::ask(&config, "hello").await,
        Err(GleanerError::Config(ConfigError::Validation(_)))
    ));
}
