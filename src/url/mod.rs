//! URL handling module for Site-Gleaner
//!
//! This module provides registrable-domain extraction and the URL-derived
//! anchor text used to rank links before they are fetched.

mod domain;

use ::url::Url;
use std::borrow::Cow;

// Re-export main functions
pub use domain::{registrable_domain, same_site};

/// Derives an approximate anchor text from a link's URL
///
/// Takes the last non-empty path segment, percent-decodes it and replaces
/// hyphens with spaces, so `https://example.com/docs/getting-started/` yields
/// `getting started`. A segment that does not decode to UTF-8 is used as is.
/// Returns `None` when the path has no usable segment (e.g. the site root).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_gleaner::url::anchor_text;
///
/// let url = Url::parse("https://example.com/blog/loyal-dog-breeds").unwrap();
/// assert_eq!(anchor_text(&url), Some("loyal dog breeds".to_string()));
///
/// let root = Url::parse("https://example.com/").unwrap();
/// assert_eq!(anchor_text(&root), None);
/// ```
pub fn anchor_text(url: &Url) -> Option<String> {
    let segment = url
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()?;

    let decoded = urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment));
    let text = decoded.replace('-', " ");
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
