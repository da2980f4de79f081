//! Authorization engine for repo and entry operations.
//!
//! Every route resolves to exactly one [`AccessPolicy`]; the decision
//! functions below are pure over the repo's visibility and the request's
//! [`SessionContext`], so the whole state machine is testable without a
//! database. Two historical regimes (per-call passphrase vs. session
//! binding) are consolidated here: session binding authorizes repo patch
//! and all entry mutation, while repo deletion alone demands a fresh
//! passphrase even inside an authenticated session.
//!
//! Privacy rule: failures on private repos never reveal anything beyond
//! the status code. No titles, no entry data, no hints.

use crate::error::{AppError, AppResult};
use crate::session::SessionContext;

/// How an operation authenticates, resolved once per route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Anyone may call; private repos still require a matching session.
    Public,
    /// The session's working repo must match the target access key.
    SessionBound,
    /// A passphrase in the request body is verified fresh against the store.
    PasswordBound,
}

/// The operations the API exposes on a repo and its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ViewRepo,
    ReadRepoJson,
    PatchRepo,
    DeleteRepo,
    MutateEntries,
    Scrape,
}

impl Operation {
    /// The single policy each operation resolves to.
    pub fn policy(self) -> AccessPolicy {
        match self {
            Operation::ViewRepo | Operation::ReadRepoJson => AccessPolicy::Public,
            Operation::PatchRepo | Operation::MutateEntries | Operation::Scrape => {
                AccessPolicy::SessionBound
            }
            Operation::DeleteRepo => AccessPolicy::PasswordBound,
        }
    }
}

/// Decides whether a repo may be read with the given session.
///
/// Public repos are always readable. Private repos require a working-repo
/// binding: absent → `Unauthorized`, bound to a different key → `Forbidden`.
pub fn authorize_read(access_key: &str, is_private: bool, ctx: &SessionContext) -> AppResult<()> {
    if !is_private {
        return Ok(());
    }
    match ctx.working_repo.as_deref() {
        None => Err(AppError::Unauthorized {
            message: "authentication required".to_string(),
        }),
        Some(working) if working != access_key => Err(AppError::Forbidden {
            message: "session is not authorized for this repo".to_string(),
        }),
        Some(_) => Ok(()),
    }
}

/// Decides whether a session may mutate the repo (or its entries).
///
/// No binding → `Unauthorized`; binding for another key → `Forbidden`.
pub fn authorize_write(access_key: &str, ctx: &SessionContext) -> AppResult<()> {
    match ctx.working_repo.as_deref() {
        None => Err(AppError::Unauthorized {
            message: "authentication required".to_string(),
        }),
        Some(working) if working != access_key => Err(AppError::Forbidden {
            message: "session is not authorized for this repo".to_string(),
        }),
        Some(_) => Ok(()),
    }
}

/// Requires any working-repo binding at all (scrape helper gate).
pub fn require_session(ctx: &SessionContext) -> AppResult<()> {
    if ctx.working_repo.is_some() {
        Ok(())
    } else {
        Err(AppError::Unauthorized {
            message: "authentication required".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_for(key: &str) -> SessionContext {
        SessionContext {
            working_repo: Some(key.to_string()),
            last_viewed: None,
        }
    }

    #[test]
    fn public_repo_is_readable_without_a_session() {
        assert!(authorize_read("abc123", false, &SessionContext::default()).is_ok());
    }

    #[test]
    fn public_repo_is_readable_with_a_foreign_binding() {
        assert!(authorize_read("abc123", false, &session_for("other")).is_ok());
    }

    #[test]
    fn private_repo_without_session_is_unauthorized() {
        let result = authorize_read("abc123", true, &SessionContext::default());
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn private_repo_with_foreign_binding_is_forbidden() {
        let result = authorize_read("abc123", true, &session_for("other"));
        assert!(matches!(result, Err(AppError::Forbidden { .. })));
    }

    #[test]
    fn private_repo_with_matching_binding_is_readable() {
        assert!(authorize_read("abc123", true, &session_for("abc123")).is_ok());
    }

    #[test]
    fn last_viewed_carries_no_authorization_weight() {
        let ctx = SessionContext {
            working_repo: None,
            last_viewed: Some("abc123".to_string()),
        };
        let result = authorize_read("abc123", true, &ctx);
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn write_without_session_is_unauthorized() {
        let result = authorize_write("abc123", &SessionContext::default());
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn write_with_foreign_binding_is_forbidden() {
        let result = authorize_write("abc123", &session_for("other"));
        assert!(matches!(result, Err(AppError::Forbidden { .. })));
    }

    #[test]
    fn write_with_matching_binding_is_allowed() {
        assert!(authorize_write("abc123", &session_for("abc123")).is_ok());
    }

    #[test]
    fn scrape_requires_any_binding() {
        assert!(require_session(&SessionContext::default()).is_err());
        assert!(require_session(&session_for("whatever")).is_ok());
    }

    #[test]
    fn policies_are_consolidated_per_operation() {
        assert_eq!(Operation::ViewRepo.policy(), AccessPolicy::Public);
        assert_eq!(Operation::ReadRepoJson.policy(), AccessPolicy::Public);
        assert_eq!(Operation::PatchRepo.policy(), AccessPolicy::SessionBound);
        assert_eq!(Operation::MutateEntries.policy(), AccessPolicy::SessionBound);
        assert_eq!(Operation::Scrape.policy(), AccessPolicy::SessionBound);
        assert_eq!(Operation::DeleteRepo.policy(), AccessPolicy::PasswordBound);
    }

    #[test]
    fn authorization_errors_do_not_leak_repo_data() {
        let err = authorize_read("secretKey1", true, &SessionContext::default()).unwrap_err();
        let rendered = format!("{err}");
        assert!(!rendered.contains("secretKey1"));
    }
}
