//! HTML parser for extracting visible text and internal links
//!
//! This module handles parsing fetched HTML to extract:
//! - The human-visible text, with page chrome and scripts removed
//! - Links that stay on the same registrable domain as the page

use crate::url::same_site;
use scraper::{Html, Node, Selector};
use std::collections::HashSet;
use url::Url;

/// Elements whose whole subtree is treated as noise
const NOISE_ELEMENTS: &[&str] = &["script", "style", "header", "footer", "nav", "aside"];

/// Extracts the visible text of an HTML document
///
/// Subtrees rooted at `script`, `style`, `header`, `footer`, `nav` and
/// `aside` are dropped, as are comments. Every remaining text node is
/// trimmed and the non-empty ones are joined with single spaces in document
/// order. The HTML5 parser recovers from any malformed input, so this never
/// fails; unusable markup just yields less (or no) text.
///
/// # Example
///
/// ```
/// use site_gleaner::crawler::extract_visible_text;
///
/// let html = "<html><body><nav>Menu</nav><p>Hello <b>world</b>.</p><script>x()</script></body></html>";
/// assert_eq!(extract_visible_text(html), "Hello world .");
/// ```
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut pieces: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| NOISE_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            pieces.push(trimmed);
        }
    }

    pieces.join(" ")
}

/// Extracts the links on a page that stay on the page's registrable domain
///
/// Every `<a href>` is resolved against `base_url`; only HTTP(S) targets
/// whose registrable domain equals the base's survive. The result has no
/// duplicates and keeps first-discovery order.
///
/// # Example
///
/// ```
/// use site_gleaner::crawler::get_internal_links;
/// use url::Url;
///
/// let base = Url::parse("https://a.example.com/x").unwrap();
/// let html = r#"<a href="/page">In</a><a href="https://other.com/">Out</a>"#;
/// let links = get_internal_links(&base, html);
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "https://a.example.com/page");
/// ```
pub fn get_internal_links(base_url: &Url, html: &str) -> Vec<Url> {
    let document = Html::parse_document(html);
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(link) = resolve_link(href, base_url) else {
            continue;
        };

        if !same_site(base_url, &link) {
            continue;
        }

        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url)
        }
        _ => None,
    }
}
