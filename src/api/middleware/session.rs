//! Session extraction middleware.
//!
//! Resolves the session cookie against the in-process store and inserts an
//! explicit [`CurrentSession`] into request extensions. Handlers and the
//! authorization engine read that object, never ambient state. A request
//! with no cookie, or a cookie for an expired session, gets an empty
//! context with no id; only the auth handler mints new sessions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::session::{SESSION_COOKIE_NAME, SessionContext};
use crate::state::AppState;

/// The request's resolved session, if any.
#[derive(Debug, Clone, Default)]
pub struct CurrentSession {
    /// Live session id; `None` until authentication creates one.
    pub id: Option<String>,
    /// The session's authorization context (empty without a session).
    pub context: SessionContext,
}

pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(request.headers());

    let current = jar
        .get(SESSION_COOKIE_NAME)
        .and_then(|cookie| {
            state.sessions.resolve(cookie.value()).map(|context| CurrentSession {
                id: Some(cookie.value().to_string()),
                context,
            })
        })
        .unwrap_or_default();

    request.extensions_mut().insert(current);

    next.run(request).await
}
