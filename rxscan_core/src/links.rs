//! Marketplace search links for extracted candidates.

use serde::{Deserialize, Serialize};

/// Search page candidates link to unless configured otherwise.
pub const DEFAULT_MARKETPLACE_URL: &str = "https://pharmeasy.in/search/all";

/// A candidate name paired with its outbound search URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLink {
    pub name: String,
    pub url: String,
}

impl SearchLink {
    #[must_use]
    pub fn new(base_url: &str, name: impl Into<String>) -> Self {
        let name = name.into();
        let url = search_url(base_url, &name);
        Self { name, url }
    }
}

/// Build `<base_url>?name=<encoded name>`.
///
/// When `base_url` already carries a query string the parameter is appended
/// with `&` instead.
#[must_use]
pub fn search_url(base_url: &str, name: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{separator}name={}", urlencoding::encode(name))
}

/// Pair every candidate with its search link, preserving order.
#[must_use]
pub fn link_candidates<I, S>(base_url: &str, candidates: I) -> Vec<SearchLink>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    candidates
        .into_iter()
        .map(|name| SearchLink::new(base_url, name))
        .collect()
}
