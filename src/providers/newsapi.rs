use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::{
    article_items, content_of, endpoint, fetch_json, headline_tags, text, HeadlineProvider,
    ProviderError, Region,
};
use crate::config::DEMO_KEY;
use crate::models::Article;

pub const PAGE_SIZE: &str = "20";

/// One top-headlines query against News API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feed {
    pub country: Option<&'static str>,
    pub language: &'static str,
    pub region: Region,
}

/// Feeds in the order they are tried. Iranian outlets are rarely indexed,
/// so the English feed comes first and the localized one is the fallback.
pub const FEEDS: [Feed; 2] = [
    Feed {
        country: None,
        language: "en",
        region: Region::International,
    },
    Feed {
        country: Some("ir"),
        language: "fa",
        region: Region::Persian,
    },
];

/// Primary provider: newsapi.org top headlines.
pub struct NewsApiProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsApiProvider {
    pub fn new(client: Client, api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into(),
        }
    }

    pub fn feed_url(&self, feed: &Feed) -> Result<Url, ProviderError> {
        let api_key = self.api_key.as_deref().unwrap_or(DEMO_KEY);
        let mut params = vec![
            ("apiKey", api_key),
            ("pageSize", PAGE_SIZE),
            ("language", feed.language),
        ];
        if let Some(country) = feed.country {
            params.push(("country", country));
        }
        endpoint(&self.base_url, "/v2/top-headlines", &params)
    }

    async fn fetch_feed(&self, feed: &Feed) -> Result<Vec<Article>, ProviderError> {
        let body = fetch_json(&self.client, self.feed_url(feed)?).await?;
        Ok(normalize(&body, feed.region))
    }
}

#[async_trait]
impl HeadlineProvider for NewsApiProvider {
    fn name(&self) -> &str {
        "newsapi"
    }

    /// News API rejects the demo key, so calling it without a real one is wasted work.
    fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| key != DEMO_KEY)
    }

    async fn fetch_headlines(&self) -> Result<Vec<Article>, ProviderError> {
        for feed in &FEEDS {
            match self.fetch_feed(feed).await {
                Ok(articles) if !articles.is_empty() => {
                    tracing::debug!(
                        language = feed.language,
                        count = articles.len(),
                        "News API feed returned articles"
                    );
                    return Ok(articles);
                }
                Ok(_) => {
                    tracing::debug!(language = feed.language, "News API feed was empty");
                }
                Err(e) => {
                    tracing::warn!(error = %e, language = feed.language, "News API feed failed");
                }
            }
        }
        Ok(Vec::new())
    }
}

/// Map a News API `top-headlines` body into articles.
///
/// Items without a title are dropped; everything else is optional.
pub fn normalize(body: &Value, region: Region) -> Vec<Article> {
    article_items(body)
        .iter()
        .filter_map(|item| {
            let title = text(&item["title"])?.to_string();
            Some(Article {
                title,
                content: content_of(item),
                image: text(&item["urlToImage"]).map(str::to_string),
                date: text(&item["publishedAt"]).map(str::to_string),
                tags: Some(headline_tags(region, item)),
                url: text(&item["url"]).map(str::to_string),
            })
        })
        .collect()
}
