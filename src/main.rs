use axum::{routing::get, Router};
use axum_prometheus::PrometheusMetricLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use blog_server::aggregator::Aggregator;
use blog_server::config::Config;
use blog_server::handlers;
use blog_server::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing — JSON in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("blog_server=info,tower_http=info"));

    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("🚀 Blog server starting...");

    let config = Config::from_env().expect("Failed to load configuration");
    info!("📝 Configuration loaded");

    let http_client = reqwest::Client::new();
    let aggregator = Aggregator::from_config(&config, http_client);

    let providers = aggregator.provider_names();
    if providers.is_empty() {
        tracing::warn!("No news provider is enabled; /api/articles will always be empty");
    } else {
        info!("📰 News providers: {}", providers.join(" → "));
    }
    match aggregator.image_provider_name() {
        Some(name) => info!("🖼️  Image enrichment: {}", name),
        None => info!("🖼️  Image enrichment disabled (UNSPLASH_ACCESS_KEY not set)"),
    }

    // CORS: permissive in dev, restrictive in production.
    let cors = if config.is_dev {
        info!("🔓 CORS: permissive (dev mode)");
        CorsLayer::permissive()
    } else {
        tracing::warn!("🔒 CORS: restrictive (production mode)");
        CorsLayer::new()
    };

    let addr = config.server_addr();
    let app_state = AppState::new(aggregator);

    // Prometheus metrics layer
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    // Build router
    let app = Router::new()
        // Health check + metrics
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        // Article routes
        .route("/api/articles", get(handlers::articles::list_articles))
        .route(
            "/api/articles/search",
            get(handlers::articles::search_articles),
        )
        .route(
            "/api/articles/sample",
            get(handlers::articles::sample_article),
        )
        .route("/api/article/:slug", get(handlers::articles::get_article))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(prometheus_layer)
        .layer(cors)
        .with_state(app_state);

    // Start server
    info!("🎧 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
