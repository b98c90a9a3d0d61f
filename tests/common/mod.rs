// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing,
    Json, Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use blog_server::{
    aggregator::Aggregator,
    handlers,
    models::Article,
    providers::{HeadlineProvider, ImageProvider, ProviderError},
    state::AppState,
};

/// Build the application router around the given aggregator.
pub fn create_test_app(aggregator: Aggregator) -> Router {
    Router::new()
        .route("/health", routing::get(handlers::health_check))
        .route("/api/articles", routing::get(handlers::articles::list_articles))
        .route(
            "/api/articles/search",
            routing::get(handlers::articles::search_articles),
        )
        .route(
            "/api/articles/sample",
            routing::get(handlers::articles::sample_article),
        )
        .route("/api/article/:slug", routing::get(handlers::articles::get_article))
        .with_state(AppState::new(aggregator))
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn article(title: &str, date: Option<&str>, tags: &[&str]) -> Article {
    Article {
        title: title.to_string(),
        content: format!("{title} content"),
        image: Some(format!("https://img.example/{title}.jpg")),
        date: date.map(str::to_string),
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        url: Some(format!("https://news.example/{title}")),
    }
}

/// `count` articles dated one hour apart, oldest first.
pub fn hourly_articles(count: usize) -> Vec<Article> {
    (0..count)
        .map(|i| {
            article(
                &format!("a{i}"),
                Some(&format!("2024-05-01T{:02}:00:00Z", i % 24)),
                &["خبر"],
            )
        })
        .collect()
}

pub fn titles(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.title.as_str()).collect()
}

// ── Mock providers ───────────────────────────────────────────────────────────

pub enum Canned {
    Articles(Vec<Article>),
    Fail,
    Panic,
}

/// Headline provider with a canned answer that counts how often it is asked.
pub struct MockProvider {
    name: &'static str,
    enabled: bool,
    canned: Canned,
    calls: AtomicUsize,
}

impl MockProvider {
    fn build(name: &'static str, enabled: bool, canned: Canned) -> Arc<Self> {
        Arc::new(Self {
            name,
            enabled,
            canned,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn returning(name: &'static str, articles: Vec<Article>) -> Arc<Self> {
        Self::build(name, true, Canned::Articles(articles))
    }

    pub fn empty(name: &'static str) -> Arc<Self> {
        Self::returning(name, Vec::new())
    }

    pub fn failing(name: &'static str) -> Arc<Self> {
        Self::build(name, true, Canned::Fail)
    }

    pub fn panicking(name: &'static str) -> Arc<Self> {
        Self::build(name, true, Canned::Panic)
    }

    pub fn disabled(name: &'static str, articles: Vec<Article>) -> Arc<Self> {
        Self::build(name, false, Canned::Articles(articles))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HeadlineProvider for MockProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn fetch_headlines(&self) -> Result<Vec<Article>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.canned {
            Canned::Articles(articles) => Ok(articles.clone()),
            Canned::Fail => Err(ProviderError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            )),
            Canned::Panic => panic!("mock provider {} blew up", self.name),
        }
    }
}

/// Image provider returning a fixed batch, recording the requested counts.
pub struct MockImages {
    urls: Option<Vec<Option<String>>>,
    requested: Mutex<Vec<usize>>,
}

impl MockImages {
    pub fn returning(urls: Vec<Option<&str>>) -> Arc<Self> {
        Arc::new(Self {
            urls: Some(urls.into_iter().map(|u| u.map(str::to_string)).collect()),
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            urls: None,
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn requested(&self) -> Vec<usize> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageProvider for MockImages {
    fn name(&self) -> &str {
        "mock-images"
    }

    async fn random_images(&self, count: usize) -> Result<Vec<Option<String>>, ProviderError> {
        self.requested.lock().unwrap().push(count);
        match &self.urls {
            Some(urls) => Ok(urls.iter().take(count).cloned().collect()),
            None => Err(ProviderError::Payload("mock failure".into())),
        }
    }
}

// ── Fake upstream APIs ───────────────────────────────────────────────────────

/// What a fake upstream endpoint answers with.
#[derive(Clone, Debug)]
pub enum Reply {
    Json(Value),
    Status(StatusCode),
    Garbage,
}

impl Reply {
    pub fn articles(items: Value) -> Self {
        Reply::Json(json!({ "status": "ok", "articles": items }))
    }

    pub fn no_articles() -> Self {
        Reply::articles(json!([]))
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Json(body) => Json(body).into_response(),
            Reply::Status(status) => (status, Json(json!({ "status": "error" }))).into_response(),
            Reply::Garbage => (StatusCode::OK, "<html>not json</html>").into_response(),
        }
    }
}

/// In-process stand-in for News API, GNews and Unsplash.
///
/// Every request is recorded as `"newsapi:<language>"`, `"gnews"` or
/// `"unsplash:<count>"` so tests can assert on the call sequence.
#[derive(Clone)]
pub struct FakeUpstream {
    pub news_general: Reply,
    pub news_localized: Reply,
    pub gnews: Reply,
    pub photos: Reply,
    pub hits: Arc<Mutex<Vec<String>>>,
}

impl Default for FakeUpstream {
    fn default() -> Self {
        Self {
            news_general: Reply::no_articles(),
            news_localized: Reply::no_articles(),
            gnews: Reply::no_articles(),
            photos: Reply::Json(json!([])),
            hits: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeUpstream {
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hit_count(&self, prefix: &str) -> usize {
        self.hits().iter().filter(|h| h.starts_with(prefix)).count()
    }

    fn record(&self, hit: String) {
        self.hits.lock().unwrap().push(hit);
    }

    /// Serve the fake on an ephemeral local port and return its base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/v2/top-headlines", routing::get(fake_news_api))
            .route("/api/v4/top-headlines", routing::get(fake_gnews))
            .route("/photos/random", routing::get(fake_unsplash))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake upstream");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}

async fn fake_news_api(
    State(up): State<FakeUpstream>,
    Query(q): Query<HashMap<String, String>>,
) -> Reply {
    let language = q.get("language").cloned().unwrap_or_default();
    up.record(format!("newsapi:{language}"));
    if q.contains_key("country") {
        up.news_localized.clone()
    } else {
        up.news_general.clone()
    }
}

async fn fake_gnews(State(up): State<FakeUpstream>) -> Reply {
    up.record("gnews".to_string());
    up.gnews.clone()
}

async fn fake_unsplash(
    State(up): State<FakeUpstream>,
    Query(q): Query<HashMap<String, String>>,
) -> Reply {
    up.record(format!(
        "unsplash:{}",
        q.get("count").cloned().unwrap_or_default()
    ));
    up.photos.clone()
}

/// A News API / GNews style article item.
pub fn upstream_item(title: &str, published_at: &str, source: &str) -> Value {
    json!({
        "source": { "name": source },
        "title": title,
        "description": format!("{title} description"),
        "url": format!("https://news.example/{title}"),
        "urlToImage": format!("https://img.example/{title}.jpg"),
        "image": format!("https://img.example/{title}.jpg"),
        "publishedAt": published_at,
    })
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
