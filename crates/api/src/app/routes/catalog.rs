use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::dto::SearchQuery;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/search", get(search_catalog))
        .route("/suggestions", get(suggest_medicines))
}

/// Local inventory merged with lookup results. A listing failure yields an
/// empty result plus an error message.
pub async fn search_catalog(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<SearchQuery>,
) -> axum::response::Response {
    match services.catalog().search(query.term()).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "error": e.to_string(),
                "results": [],
            })),
        )
            .into_response(),
    }
}

pub async fn suggest_medicines(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<SearchQuery>,
) -> axum::response::Response {
    let suggestions = services.autocomplete().suggest(query.term()).await;
    (StatusCode::OK, Json(suggestions)).into_response()
}
