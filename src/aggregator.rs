//! The `/api/articles` pipeline: ordered provider fallback, image
//! enrichment, then newest-first truncation.

use std::sync::Arc;

use reqwest::Client;

use crate::config::{Config, ProviderKind};
use crate::listing::{self, SortOrder};
use crate::models::{Article, MAX_ARTICLES};
use crate::providers::{
    GNewsProvider, HeadlineProvider, ImageProvider, NewsApiProvider, UnsplashProvider,
};

pub struct Aggregator {
    providers: Vec<Arc<dyn HeadlineProvider>>,
    images: Option<Arc<dyn ImageProvider>>,
}

impl Aggregator {
    /// `providers` are tried in order; the first non-empty result wins.
    pub fn new(providers: Vec<Arc<dyn HeadlineProvider>>) -> Self {
        Self {
            providers,
            images: None,
        }
    }

    pub fn with_images(mut self, images: Arc<dyn ImageProvider>) -> Self {
        self.images = Some(images);
        self
    }

    /// Wire the real adapters, all sharing one HTTP client.
    pub fn from_config(config: &Config, client: Client) -> Self {
        let providers = config
            .providers
            .iter()
            .map(|kind| -> Arc<dyn HeadlineProvider> {
                match kind {
                    ProviderKind::NewsApi => Arc::new(NewsApiProvider::new(
                        client.clone(),
                        config.news_api_key.clone(),
                        config.news_api_base_url.clone(),
                    )),
                    ProviderKind::GNews => Arc::new(GNewsProvider::new(
                        client.clone(),
                        config.gnews_api_key.clone(),
                        config.gnews_base_url.clone(),
                    )),
                }
            })
            .collect();

        let aggregator = Self::new(providers);
        match &config.unsplash_access_key {
            Some(key) => aggregator.with_images(Arc::new(UnsplashProvider::new(
                client,
                key.clone(),
                config.unsplash_base_url.clone(),
            ))),
            None => aggregator,
        }
    }

    /// Names of the providers that will actually be called, in order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers
            .iter()
            .filter(|p| p.is_enabled())
            .map(|p| p.name())
            .collect()
    }

    pub fn image_provider_name(&self) -> Option<&str> {
        self.images.as_deref().map(|p| p.name())
    }

    /// Run the whole pipeline. Provider failures are logged and absorbed;
    /// an empty list means every provider came back empty or failed.
    pub async fn collect(&self) -> Vec<Article> {
        let mut articles = self.first_available().await;
        if articles.is_empty() {
            tracing::info!("No provider returned articles");
            return articles;
        }

        if let Some(images) = &self.images {
            enrich_images(images.as_ref(), &mut articles).await;
        }

        listing::sort_by(&mut articles, SortOrder::Newest);
        articles.truncate(MAX_ARTICLES);
        articles
    }

    async fn first_available(&self) -> Vec<Article> {
        for provider in &self.providers {
            if !provider.is_enabled() {
                tracing::debug!(provider = provider.name(), "Skipping disabled provider");
                continue;
            }

            match provider.fetch_headlines().await {
                Ok(articles) if !articles.is_empty() => {
                    tracing::info!(
                        provider = provider.name(),
                        count = articles.len(),
                        "Fetched headlines"
                    );
                    return articles;
                }
                Ok(_) => {
                    tracing::info!(provider = provider.name(), "Provider returned no articles");
                }
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "Provider failed");
                }
            }
        }
        Vec::new()
    }
}

async fn enrich_images(images: &dyn ImageProvider, articles: &mut [Article]) {
    match images.random_images(articles.len()).await {
        Ok(urls) => overlay_images(articles, urls),
        Err(e) => {
            tracing::warn!(provider = images.name(), error = %e, "Image enrichment failed");
        }
    }
}

/// Replace `articles[i].image` with `urls[i]` where the latter is present.
/// Articles without a matching entry keep their own image.
pub fn overlay_images(articles: &mut [Article], urls: Vec<Option<String>>) {
    for (article, url) in articles.iter_mut().zip(urls) {
        if let Some(url) = url {
            article.image = Some(url);
        }
    }
}
