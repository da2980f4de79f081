//! Repo-related DTOs for API requests and responses.

use crate::models::{Entry, Repo, UpdateRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::EntryResponse;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new repo.
///
/// The title/description bounds mirror the column widths, so a violation is
/// caught here as a 400 before the store ever sees it.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRepoRequest {
    #[validate(length(min = 1, message = "Pass phrase must not be empty"))]
    pub pass_phrase: String,
    #[validate(length(max = 50, message = "Title must be at most 50 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 300, message = "Description must be at most 300 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub is_private: bool,
}

/// Request body for authenticating against a repo.
#[derive(Debug, Deserialize, Validate)]
pub struct AuthRequest {
    #[validate(length(min = 1, message = "Access key must not be empty"))]
    pub access_key: String,
    #[validate(length(min = 1, message = "Pass phrase must not be empty"))]
    pub pass_phrase: String,
}

/// Request body for updating a repo. Every field optional; an empty patch
/// is rejected by the service.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRepoRequest {
    #[validate(length(max = 50, message = "Title must be at most 50 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 300, message = "Description must be at most 300 characters"))]
    pub description: Option<String>,
    pub is_private: Option<bool>,
}

impl UpdateRepoRequest {
    /// Converts the request DTO into an UpdateRepo model.
    pub fn into_update_repo(self) -> UpdateRepo {
        UpdateRepo {
            title: self.title,
            description: self.description,
            is_private: self.is_private,
        }
    }
}

/// Request body for deleting a repo: the passphrase is re-verified fresh
/// even inside an authenticated session.
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteRepoRequest {
    #[validate(length(min = 1, message = "Pass phrase must not be empty"))]
    pub pass_phrase: String,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for repo creation.
#[derive(Debug, Serialize)]
pub struct CreateRepoResponse {
    pub created: String,
}

/// Response body for successful authentication.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub authenticated: bool,
    pub access_key: String,
}

/// Response body for repo deletion.
#[derive(Debug, Serialize)]
pub struct DeleteRepoResponse {
    pub deleted: String,
}

/// Response body for repo data with its entries in display order.
///
/// Built field-by-field from the model; the passphrase hash has no field
/// here and can never serialize.
#[derive(Debug, Serialize)]
pub struct RepoResponse {
    pub access_key: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_private: bool,
    pub last_visited: String,
    pub entries: Vec<EntryResponse>,
}

impl RepoResponse {
    pub fn from_parts(repo: Repo, entries: Vec<Entry>) -> Self {
        Self {
            access_key: repo.access_key,
            title: repo.title,
            description: repo.description,
            is_private: repo.is_private,
            last_visited: repo.last_visited.format("%Y-%m-%d %H:%M:%S").to_string(),
            entries: entries.into_iter().map(EntryResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryType;

    fn sample_repo(hash: &str) -> Repo {
        Repo {
            access_key: "123abcDEF0".to_string(),
            pass_phrase: hash.to_string(),
            title: Some("Test Repo".to_string()),
            description: Some("Test Desc".to_string()),
            is_private: false,
            last_visited: chrono::NaiveDate::from_ymd_opt(2025, 6, 10)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn repo_json_never_contains_the_hash() {
        let hash = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$YWJjZGVmZ2g";
        let entries = vec![Entry {
            id: 1,
            title: "entry title".to_string(),
            description: None,
            image: None,
            url: Some("http://url.com".to_string()),
            entry_type: EntryType::Link,
            rating: None,
            sequence: None,
            repo_access_key: "123abcDEF0".to_string(),
        }];

        let json =
            serde_json::to_string(&RepoResponse::from_parts(sample_repo(hash), entries)).unwrap();

        assert!(!json.contains(hash));
        assert!(!json.contains("pass_phrase"));
        assert!(json.contains("\"access_key\":\"123abcDEF0\""));
        assert!(json.contains("\"title\":\"Test Repo\""));
    }

    #[test]
    fn last_visited_serializes_as_timestamp_string() {
        let response = RepoResponse::from_parts(sample_repo("x"), Vec::new());
        assert_eq!(response.last_visited, "2025-06-10 12:30:00");
    }

    #[test]
    fn oversize_title_and_description_are_both_reported() {
        let request = CreateRepoRequest {
            pass_phrase: "secret".to_string(),
            title: Some("x".repeat(51)),
            description: Some("y".repeat(301)),
            is_private: false,
        };
        let errors = request.validate().unwrap_err();
        let fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        assert!(fields.contains(&"title".to_string()));
        assert!(fields.contains(&"description".to_string()));
    }

    #[test]
    fn bounds_are_inclusive() {
        let request = CreateRepoRequest {
            pass_phrase: "secret".to_string(),
            title: Some("x".repeat(50)),
            description: Some("y".repeat(300)),
            is_private: true,
        };
        assert!(request.validate().is_ok());
    }
}
