//! Adapters for the third-party APIs the aggregation pipeline talks to.
//!
//! Each headline provider turns its own response shape into [`Article`]s
//! with a dedicated `normalize` function; the pipeline only sees the
//! [`HeadlineProvider`] and [`ImageProvider`] traits.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::models::{Article, NO_DESCRIPTION};

pub mod gnews;
pub mod newsapi;
pub mod unsplash;

pub use gnews::GNewsProvider;
pub use newsapi::NewsApiProvider;
pub use unsplash::UnsplashProvider;

/// Category tag placed first on every provider article ("news").
pub const NEWS_TAG: &str = "خبر";
/// Tag used when the provider does not name the publishing outlet ("source").
pub const UNKNOWN_SOURCE_TAG: &str = "منبع";

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {0}")]
    Status(StatusCode),

    #[error("Malformed payload: {0}")]
    Payload(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Which audience a feed targets; becomes the second tag of each article.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    International,
    Persian,
}

impl Region {
    pub fn label(self) -> &'static str {
        match self {
            Region::International => "بین\u{200c}المللی",
            Region::Persian => "فارسی",
        }
    }
}

/// A source of top headlines, tried in order by the aggregator.
#[async_trait]
pub trait HeadlineProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Disabled providers are skipped without being called.
    fn is_enabled(&self) -> bool {
        true
    }

    async fn fetch_headlines(&self) -> Result<Vec<Article>, ProviderError>;
}

/// A source of stock photos used to decorate articles.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Returns up to `count` entries; entry `i` is meant for article `i`.
    /// `None` marks an entry that carried no usable URL.
    async fn random_images(&self, count: usize) -> Result<Vec<Option<String>>, ProviderError>;
}

// ── Shared helpers ─────────────────────────────────────────────────────────

/// GET `url` and parse the body as JSON, mapping every failure mode to a
/// [`ProviderError`].
pub(crate) async fn fetch_json(client: &Client, url: Url) -> Result<Value, ProviderError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status(status));
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ProviderError::Payload(e.to_string()))
}

/// Build `base` + `path` with the given query parameters percent-encoded.
pub(crate) fn endpoint(
    base: &str,
    path: &str,
    params: &[(&str, &str)],
) -> Result<Url, ProviderError> {
    let raw = format!("{}{}", base.trim_end_matches('/'), path);
    Ok(Url::parse_with_params(&raw, params)?)
}

/// Trimmed string value of a JSON field, `None` when absent, not a string, or blank.
pub(crate) fn text(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// Content falls back from the long description to the body to a placeholder.
pub(crate) fn content_of(item: &Value) -> String {
    text(&item["description"])
        .or_else(|| text(&item["content"]))
        .unwrap_or(NO_DESCRIPTION)
        .to_string()
}

pub(crate) fn headline_tags(region: Region, item: &Value) -> Vec<String> {
    vec![
        NEWS_TAG.to_string(),
        region.label().to_string(),
        text(&item["source"]["name"])
            .unwrap_or(UNKNOWN_SOURCE_TAG)
            .to_string(),
    ]
}

/// The `articles` array of a headlines response, empty when missing.
pub(crate) fn article_items(body: &Value) -> &[Value] {
    body["articles"].as_array().map(Vec::as_slice).unwrap_or(&[])
}
