use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    listing::{self, SortOrder, ALL_CATEGORIES, DEFAULT_PAGE_SIZE, RELATED_LIMIT},
    models::{self, Article, ArticleDetailResponse, ArticlesResponse, SearchResponse},
    state::AppState,
};

// ============================================================================
// Input validation
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub sort: SortOrder,
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: usize,
    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = 50, message = "per_page must be between 1 and 50"))]
    pub per_page: usize,
}

fn default_category() -> String {
    ALL_CATEGORIES.to_string()
}

fn default_page() -> usize {
    1
}

fn default_per_page() -> usize {
    DEFAULT_PAGE_SIZE
}

// ============================================================================
// Helpers
// ============================================================================

/// Run the aggregation pipeline on its own task.
///
/// Provider failures never reach this point; a join error means the
/// pipeline itself panicked, which is the only internal fault we report.
async fn aggregate(state: &AppState) -> AppResult<Vec<Article>> {
    let aggregator = state.aggregator.clone();
    tokio::spawn(async move { aggregator.collect().await })
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "Article aggregation task failed");
            AppError::Internal
        })
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/articles — up to six of the latest headlines, newest first.
///
/// An empty list is a normal 200. An internal fault is a 500 that still
/// carries `{ "articles": [] }` so clients can render the empty state.
pub async fn list_articles(State(state): State<AppState>) -> (StatusCode, Json<ArticlesResponse>) {
    match aggregate(&state).await {
        Ok(articles) => (StatusCode::OK, Json(ArticlesResponse { articles })),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ArticlesResponse::default()),
        ),
    }
}

/// GET /api/articles/search — search, filter, sort and paginate the latest headlines.
pub async fn search_articles(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    params.validate()?;

    let articles = aggregate(&state).await?;
    let categories = listing::categories(&articles);

    let mut matching = listing::filter(&articles, |a| {
        listing::matches_query(a, &params.q) && listing::matches_category(a, &params.category)
    });
    listing::sort_by(&mut matching, params.sort);
    let page = listing::paginate(matching, params.per_page, params.page);

    Ok(Json(SearchResponse {
        articles: page.items,
        page: page.page,
        total_pages: page.total_pages,
        total: page.total,
        categories,
    }))
}

/// GET /api/article/:slug — one article by title, plus up to three related ones.
///
/// The slug is the percent-encoded title; axum decodes it before we see it.
pub async fn get_article(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<ArticleDetailResponse>> {
    let articles = aggregate(&state).await?;

    let article = listing::find_by_title(&articles, &title)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Article not found".into()))?;
    let related = listing::related(&articles, &article, RELATED_LIMIT);

    Ok(Json(ArticleDetailResponse { article, related }))
}

/// GET /api/articles/sample — the canned "AI-generated" article.
pub async fn sample_article() -> Json<Article> {
    Json(models::sample_article())
}
