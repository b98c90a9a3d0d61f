pub mod articles;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// Reports which upstream providers this instance will call. There is no
/// backing store, so the service is healthy whenever it can answer.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "blog-server",
        "version": env!("CARGO_PKG_VERSION"),
        "providers": state.aggregator.provider_names(),
        "images": state.aggregator.image_provider_name(),
    }))
}
