use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::{
    article_items, content_of, endpoint, fetch_json, headline_tags, text, HeadlineProvider,
    ProviderError, Region,
};
use crate::models::Article;

pub const MAX_RESULTS: &str = "20";

/// Fallback provider: gnews.io top headlines for Iran, in Persian.
///
/// GNews serves a limited public `demo` key, so this provider is always enabled.
pub struct GNewsProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GNewsProvider {
    pub fn new(client: Client, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    pub fn headlines_url(&self) -> Result<Url, ProviderError> {
        endpoint(
            &self.base_url,
            "/api/v4/top-headlines",
            &[
                ("country", "ir"),
                ("lang", "fa"),
                ("max", MAX_RESULTS),
                ("apikey", self.api_key.as_str()),
            ],
        )
    }
}

#[async_trait]
impl HeadlineProvider for GNewsProvider {
    fn name(&self) -> &str {
        "gnews"
    }

    async fn fetch_headlines(&self) -> Result<Vec<Article>, ProviderError> {
        let body = fetch_json(&self.client, self.headlines_url()?).await?;
        Ok(normalize(&body))
    }
}

/// Map a GNews `top-headlines` body into articles tagged as Persian.
pub fn normalize(body: &Value) -> Vec<Article> {
    article_items(body)
        .iter()
        .filter_map(|item| {
            let title = text(&item["title"])?.to_string();
            Some(Article {
                title,
                content: content_of(item),
                image: text(&item["image"]).map(str::to_string),
                date: text(&item["publishedAt"]).map(str::to_string),
                tags: Some(headline_tags(Region::Persian, item)),
                url: text(&item["url"]).map(str::to_string),
            })
        })
        .collect()
}
