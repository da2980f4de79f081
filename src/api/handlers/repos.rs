//! Repo lifecycle request handlers.
//!
//! Session mutation stays up here at the HTTP layer: services decide,
//! handlers bind/clear the session store and set cookies.

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::dto::{
    AuthRequest, AuthResponse, CreateRepoRequest, CreateRepoResponse, DeleteRepoRequest,
    DeleteRepoResponse, RepoResponse, UpdateRepoRequest,
};
use crate::api::middleware::CurrentSession;
use crate::error::AppResult;
use crate::session::create_session_cookie;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates repo-related routes.
///
/// Routes:
/// - POST /create       - Create a new repo
/// - POST /auth         - Authenticate a session against a repo
/// - GET /{key}         - Read a repo with its entries
/// - PATCH /{key}       - Update repo fields (session-bound)
/// - DELETE /{key}      - Delete a repo (fresh passphrase required)
pub fn repo_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_repo))
        .route("/auth", post(authenticate))
        .route(
            "/{key}",
            get(get_repo).patch(update_repo).delete(delete_repo),
        )
}

/// POST /api/repo/create - Create a new repo
///
/// Hashes the passphrase, generates the access key and returns it.
async fn create_repo(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateRepoRequest>,
) -> AppResult<Json<CreateRepoResponse>> {
    let repo = state
        .services
        .repos
        .create_repo(
            &payload.pass_phrase,
            payload.title,
            payload.description,
            payload.is_private,
        )
        .await?;

    Ok(Json(CreateRepoResponse {
        created: repo.access_key,
    }))
}

/// POST /api/repo/auth - Authenticate against a repo
///
/// On success binds the session's working repo and (re)issues the session
/// cookie with its full lifetime.
async fn authenticate(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<AuthRequest>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    state
        .services
        .repos
        .authenticate(&payload.access_key, &payload.pass_phrase)
        .await?;

    let session_id = match current.id {
        Some(id) => id,
        None => state.sessions.create(),
    };
    state
        .sessions
        .bind_working_repo(&session_id, &payload.access_key);

    let jar = jar.add(create_session_cookie(session_id, state.cookie_secure));
    Ok((
        jar,
        Json(AuthResponse {
            authenticated: true,
            access_key: payload.access_key,
        }),
    ))
}

/// GET /api/repo/{key} - Read a repo
///
/// Public repos are readable by anyone; private repos require a matching
/// session binding. An authorized read stamps `last_visited` and records
/// `last_viewed` on the session.
async fn get_repo(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Extension(current): Extension<CurrentSession>,
) -> AppResult<Json<RepoResponse>> {
    let (repo, entries) = state.services.repos.view_repo(&key, &current.context).await?;

    if let Some(session_id) = &current.id {
        state.sessions.set_last_viewed(session_id, &key);
    }

    Ok(Json(RepoResponse::from_parts(repo, entries)))
}

/// PATCH /api/repo/{key} - Update repo fields
///
/// Session-bound. All provided fields are validated together and applied
/// atomically; returns the updated repo JSON.
async fn update_repo(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Extension(current): Extension<CurrentSession>,
    ValidatedJson(payload): ValidatedJson<UpdateRepoRequest>,
) -> AppResult<Json<RepoResponse>> {
    let (repo, entries) = state
        .services
        .repos
        .update_repo(&key, &current.context, payload.into_update_repo())
        .await?;

    Ok(Json(RepoResponse::from_parts(repo, entries)))
}

/// DELETE /api/repo/{key} - Delete a repo
///
/// Requires the passphrase in the body, verified fresh. Cascades entries
/// away and clears every session binding to the deleted key.
async fn delete_repo(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Extension(_current): Extension<CurrentSession>,
    ValidatedJson(payload): ValidatedJson<DeleteRepoRequest>,
) -> AppResult<Json<DeleteRepoResponse>> {
    state
        .services
        .repos
        .delete_repo(&key, &payload.pass_phrase)
        .await?;

    state.sessions.clear_bindings_to(&key);

    Ok(Json(DeleteRepoResponse { deleted: key }))
}
