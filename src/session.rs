//! Client session state for repo authorization.
//!
//! A session is an HttpOnly cookie holding an opaque id into an in-process
//! store. The store keeps, per session, the access key the client has
//! authenticated against (`working_repo`) and the most recently viewed key
//! (`last_viewed`, display convenience only; it grants nothing).
//! Lifetime is 7 days, sliding: any resolved request pushes expiry forward.

use axum_extra::extract::cookie::{Cookie, SameSite};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

pub const SESSION_COOKIE_NAME: &str = "linkrepo_session";
const SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Per-request session view handed to handlers and the authorization
/// engine. Never read from ambient global state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// Access key the session is currently authenticated against.
    pub working_repo: Option<String>,
    /// Access key of the most recently viewed repo. No authorization weight.
    pub last_viewed: Option<String>,
}

#[derive(Debug, Clone)]
struct SessionData {
    context: SessionContext,
    expires_at: i64,
}

/// In-process session store keyed by opaque session id.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, SessionData>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Creates an empty session and returns its id.
    pub fn create(&self) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.sessions.insert(
            session_id.clone(),
            SessionData {
                context: SessionContext::default(),
                expires_at: now_secs() + SESSION_TTL_SECS,
            },
        );
        session_id
    }

    /// Looks up a live session, extending its lifetime (sliding expiry).
    /// Expired sessions are dropped on touch and resolve to `None`.
    pub fn resolve(&self, session_id: &str) -> Option<SessionContext> {
        let now = now_secs();
        let mut expired = false;
        // The guard must drop before remove() touches the same shard.
        let resolved = match self.sessions.get_mut(session_id) {
            Some(mut data) if data.expires_at > now => {
                data.expires_at = now + SESSION_TTL_SECS;
                Some(data.context.clone())
            }
            Some(_) => {
                expired = true;
                None
            }
            None => None,
        };
        if expired {
            self.sessions.remove(session_id);
        }
        resolved
    }

    /// Binds the session to a repo after successful authentication.
    pub fn bind_working_repo(&self, session_id: &str, access_key: &str) {
        if let Some(mut data) = self.sessions.get_mut(session_id) {
            data.context.working_repo = Some(access_key.to_string());
            data.expires_at = now_secs() + SESSION_TTL_SECS;
        }
    }

    /// Records the most recently viewed repo.
    pub fn set_last_viewed(&self, session_id: &str, access_key: &str) {
        if let Some(mut data) = self.sessions.get_mut(session_id) {
            data.context.last_viewed = Some(access_key.to_string());
        }
    }

    /// Clears every session binding to a repo, across all sessions.
    /// Called when the repo is deleted.
    pub fn clear_bindings_to(&self, access_key: &str) {
        for mut entry in self.sessions.iter_mut() {
            let context = &mut entry.value_mut().context;
            if context.working_repo.as_deref() == Some(access_key) {
                context.working_repo = None;
            }
            if context.last_viewed.as_deref() == Some(access_key) {
                context.last_viewed = None;
            }
        }
    }

    /// Drops every expired session. Callable from a periodic sweep.
    pub fn purge_expired(&self) {
        let now = now_secs();
        self.sessions.retain(|_, data| data.expires_at > now);
    }

    #[cfg(test)]
    fn force_expire(&self, session_id: &str) {
        if let Some(mut data) = self.sessions.get_mut(session_id) {
            data.expires_at = now_secs() - 1;
        }
    }
}

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Builds the session cookie attached after a successful authentication.
pub fn create_session_cookie(session_id: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, session_id))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS))
        .path("/")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_resolve_yields_empty_context() {
        let store = SessionStore::new();
        let id = store.create();
        assert_eq!(store.resolve(&id), Some(SessionContext::default()));
    }

    #[test]
    fn unknown_session_does_not_resolve() {
        let store = SessionStore::new();
        assert_eq!(store.resolve("nope"), None);
    }

    #[test]
    fn expired_session_is_dropped_on_resolve() {
        let store = SessionStore::new();
        let id = store.create();
        store.force_expire(&id);
        assert_eq!(store.resolve(&id), None);
        // a second lookup still finds nothing
        assert_eq!(store.resolve(&id), None);
    }

    #[test]
    fn bind_working_repo_is_visible_on_resolve() {
        let store = SessionStore::new();
        let id = store.create();
        store.bind_working_repo(&id, "123abcDEF0");

        let context = store.resolve(&id).unwrap();
        assert_eq!(context.working_repo.as_deref(), Some("123abcDEF0"));
        assert_eq!(context.last_viewed, None);
    }

    #[test]
    fn clear_bindings_to_unbinds_every_session() {
        let store = SessionStore::new();
        let a = store.create();
        let b = store.create();
        store.bind_working_repo(&a, "sharedKey1");
        store.bind_working_repo(&b, "sharedKey1");
        store.set_last_viewed(&b, "sharedKey1");

        store.clear_bindings_to("sharedKey1");

        assert_eq!(store.resolve(&a).unwrap().working_repo, None);
        let b_context = store.resolve(&b).unwrap();
        assert_eq!(b_context.working_repo, None);
        assert_eq!(b_context.last_viewed, None);
    }

    #[test]
    fn clear_bindings_leaves_other_repos_alone() {
        let store = SessionStore::new();
        let id = store.create();
        store.bind_working_repo(&id, "otherKey12");

        store.clear_bindings_to("deletedKey");

        assert_eq!(
            store.resolve(&id).unwrap().working_repo.as_deref(),
            Some("otherKey12")
        );
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = create_session_cookie("abc".to_string(), true);
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::seconds(SESSION_TTL_SECS))
        );
    }
}
