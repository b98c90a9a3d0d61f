use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::{endpoint, fetch_json, text, ImageProvider, ProviderError};

/// Unsplash caps `/photos/random` batches at 30.
pub const MAX_COUNT: usize = 30;
pub const SEARCH_TERM: &str = "technology";

pub struct UnsplashProvider {
    client: Client,
    access_key: String,
    base_url: String,
}

impl UnsplashProvider {
    pub fn new(client: Client, access_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            access_key: access_key.into(),
            base_url: base_url.into(),
        }
    }

    pub fn random_url(&self, count: usize) -> Result<Url, ProviderError> {
        let count = count.clamp(1, MAX_COUNT).to_string();
        endpoint(
            &self.base_url,
            "/photos/random",
            &[
                ("query", SEARCH_TERM),
                ("count", count.as_str()),
                ("client_id", self.access_key.as_str()),
            ],
        )
    }
}

#[async_trait]
impl ImageProvider for UnsplashProvider {
    fn name(&self) -> &str {
        "unsplash"
    }

    async fn random_images(&self, count: usize) -> Result<Vec<Option<String>>, ProviderError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let body = fetch_json(&self.client, self.random_url(count)?).await?;
        parse_photo_urls(&body)
    }
}

/// Pull `urls.regular` out of each photo of a `/photos/random` batch.
pub fn parse_photo_urls(body: &Value) -> Result<Vec<Option<String>>, ProviderError> {
    let photos = body
        .as_array()
        .ok_or_else(|| ProviderError::Payload("expected an array of photos".into()))?;

    Ok(photos
        .iter()
        .map(|photo| text(&photo["urls"]["regular"]).map(str::to_string))
        .collect())
}
