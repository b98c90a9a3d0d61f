use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod sample;

pub use sample::sample_article;

/// Maximum number of articles returned by one aggregation run.
pub const MAX_ARTICLES: usize = 6;

/// Content used when a provider supplies neither a description nor a body.
pub const NO_DESCRIPTION: &str = "توضیحات موجود نیست";

// ============================================================================
// Article
// ============================================================================

/// A normalized news article, independent of the provider it came from.
///
/// `title` is the only identity an article has: detail URLs are built from
/// it and two articles with the same title are indistinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Publish timestamp as the provider sent it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Article {
    /// Parsed publish time, or `None` when the date is missing or unparseable.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_date)
    }

    /// Percent-encoded title, used as the path segment of detail URLs.
    pub fn slug(&self) -> String {
        urlencoding::encode(&self.title).into_owned()
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }
}

/// Parse the timestamp formats news providers emit.
///
/// RFC 3339 covers both News API and GNews; the naive forms show up in
/// hand-written fixtures and some regional feeds and are read as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Body of `GET /api/articles`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
}

/// Body of `GET /api/articles/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub articles: Vec<Article>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
    /// "All" followed by every distinct tag of the unfiltered result set.
    pub categories: Vec<String>,
}

/// Body of `GET /api/article/:slug`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDetailResponse {
    pub article: Article,
    pub related: Vec<Article>,
}
