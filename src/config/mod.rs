use std::env;
use std::str::FromStr;

use strum::{Display, EnumString};
use thiserror::Error;

/// Credential value meaning "no real key configured".
pub const DEMO_KEY: &str = "demo";

pub const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org";
pub const DEFAULT_GNEWS_BASE_URL: &str = "https://gnews.io";
pub const DEFAULT_UNSPLASH_BASE_URL: &str = "https://api.unsplash.com";

/// Headline providers that can appear in the fallback chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    NewsApi,
    GNews,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown news provider: {0}")]
    UnknownProvider(String),

    #[error("NEWS_PROVIDERS must name at least one provider")]
    NoProviders,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub is_dev: bool,
    /// `None` or [`DEMO_KEY`] disables News API.
    pub news_api_key: Option<String>,
    pub gnews_api_key: String,
    /// `None` disables image enrichment.
    pub unsplash_access_key: Option<String>,
    /// Fallback order, highest priority first.
    pub providers: Vec<ProviderKind>,
    pub news_api_base_url: String,
    pub gnews_base_url: String,
    pub unsplash_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            is_dev: true,
            news_api_key: None,
            gnews_api_key: DEMO_KEY.to_string(),
            unsplash_access_key: None,
            providers: vec![ProviderKind::NewsApi, ProviderKind::GNews],
            news_api_base_url: DEFAULT_NEWS_API_BASE_URL.to_string(),
            gnews_base_url: DEFAULT_GNEWS_BASE_URL.to_string(),
            unsplash_base_url: DEFAULT_UNSPLASH_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();
        let providers = match non_empty_var("NEWS_PROVIDERS") {
            Some(list) => parse_providers(&list)?,
            None => defaults.providers,
        };

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.server_port),
            is_dev: env::var("APP_ENV").as_deref() != Ok("production"),
            news_api_key: non_empty_var("NEWS_API_KEY"),
            gnews_api_key: non_empty_var("GNEWS_API_KEY").unwrap_or(defaults.gnews_api_key),
            unsplash_access_key: non_empty_var("UNSPLASH_ACCESS_KEY"),
            providers,
            news_api_base_url: non_empty_var("NEWS_API_BASE_URL")
                .unwrap_or(defaults.news_api_base_url),
            gnews_base_url: non_empty_var("GNEWS_BASE_URL").unwrap_or(defaults.gnews_base_url),
            unsplash_base_url: non_empty_var("UNSPLASH_BASE_URL")
                .unwrap_or(defaults.unsplash_base_url),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Parse a comma-separated provider list such as `newsapi,gnews`.
pub fn parse_providers(list: &str) -> Result<Vec<ProviderKind>, ConfigError> {
    let providers = list
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            ProviderKind::from_str(name).map_err(|_| ConfigError::UnknownProvider(name.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if providers.is_empty() {
        return Err(ConfigError::NoProviders);
    }
    Ok(providers)
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
