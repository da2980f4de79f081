//! Entry batch request handlers.

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};

use crate::api::dto::{
    CreateEntriesRequest, DeleteEntriesRequest, EntriesCreatedResponse, EntriesDeletedResponse,
    EntriesUpdatedResponse, UpdateEntriesRequest,
};
use crate::api::middleware::CurrentSession;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates entry batch routes, nested next to the repo routes.
///
/// Routes:
/// - POST /{key}/entries    - Create a batch of entries
/// - PATCH /{key}/entries   - Update a batch of entries
/// - DELETE /{key}/entries  - Delete a batch of entries
pub fn entry_routes() -> Router<AppState> {
    Router::new().route(
        "/{key}/entries",
        post(create_entries)
            .patch(update_entries)
            .delete(delete_entries),
    )
}

/// POST /api/repo/{key}/entries - Create entries
///
/// Session-bound. Returns 201 with the count created.
async fn create_entries(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Extension(current): Extension<CurrentSession>,
    ValidatedJson(payload): ValidatedJson<CreateEntriesRequest>,
) -> AppResult<(StatusCode, Json<EntriesCreatedResponse>)> {
    let rows = payload
        .new
        .into_iter()
        .map(|request| request.into_new_entry(&key))
        .collect();

    let created = state
        .services
        .entries
        .create_entries(&key, &current.context, rows)
        .await?;

    Ok((StatusCode::CREATED, Json(EntriesCreatedResponse { created })))
}

/// PATCH /api/repo/{key}/entries - Update entries
///
/// Session-bound. Every referenced id must exist and belong to this repo;
/// the batch commits atomically or not at all.
async fn update_entries(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Extension(current): Extension<CurrentSession>,
    ValidatedJson(payload): ValidatedJson<UpdateEntriesRequest>,
) -> AppResult<Json<EntriesUpdatedResponse>> {
    let changes = payload
        .change
        .into_iter()
        .map(|request| request.into_update())
        .collect();

    let updated = state
        .services
        .entries
        .update_entries(&key, &current.context, changes)
        .await?;

    Ok(Json(EntriesUpdatedResponse { updated }))
}

/// DELETE /api/repo/{key}/entries - Delete entries
///
/// Session-bound, same whole-batch validation as update.
async fn delete_entries(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Extension(current): Extension<CurrentSession>,
    ValidatedJson(payload): ValidatedJson<DeleteEntriesRequest>,
) -> AppResult<Json<EntriesDeletedResponse>> {
    let deleted = state
        .services
        .entries
        .delete_entries(&key, &current.context, payload.delete)
        .await?;

    Ok(Json(EntriesDeletedResponse { deleted }))
}
