//! Metadata scrape handler.

use std::collections::BTreeMap;

use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::api::dto::ScrapeQuery;
use crate::api::middleware::CurrentSession;
use crate::error::AppResult;
use crate::services::authorization::require_session;
use crate::state::AppState;

pub fn scrape_routes() -> Router<AppState> {
    Router::new().route("/scrape", get(scrape))
}

/// GET /api/scrape?url= - Scrape page metadata
///
/// Session-bound helper for entry editing. The pipeline itself never
/// fails: whatever happens upstream, the response is 200 with a (possibly
/// degraded) tag map.
async fn scrape(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Query(query): Query<ScrapeQuery>,
) -> AppResult<Json<BTreeMap<String, String>>> {
    require_session(&current.context)?;

    let tags = state.services.scrape.scrape(&query.url).await;
    Ok(Json(tags))
}
