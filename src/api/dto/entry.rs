//! Entry batch DTOs.
//!
//! Wire shapes follow the batch payloads: `{new: [...]}` for create,
//! `{change: [...]}` for update, `{delete: [ids]}` for delete. The JSON
//! field `type` must be one of the closed entry type variants; anything
//! else fails deserialization as a 400.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Entry, EntryType, NewEntry, UpdateEntry};

// ============================================================================
// Request DTOs
// ============================================================================

/// A single entry to create. `title` and `type` are required.
#[derive(Debug, Deserialize, Validate)]
pub struct NewEntryRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub rating: Option<i32>,
    pub sequence: Option<i32>,
}

impl NewEntryRequest {
    /// Converts into an insertable model scoped to the owning repo.
    pub fn into_new_entry(self, repo_access_key: &str) -> NewEntry {
        NewEntry {
            title: self.title,
            description: self.description,
            image: self.image,
            url: self.url,
            entry_type: self.entry_type,
            rating: self.rating,
            sequence: self.sequence,
            repo_access_key: repo_access_key.to_string(),
        }
    }
}

/// Request body for creating a batch of entries.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntriesRequest {
    #[validate(nested)]
    pub new: Vec<NewEntryRequest>,
}

/// A single entry change. `id` names the entry; all other fields optional.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangeEntryRequest {
    pub id: i32,
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: Option<EntryType>,
    pub rating: Option<i32>,
    pub sequence: Option<i32>,
}

impl ChangeEntryRequest {
    /// Splits into the target id and its change set.
    pub fn into_update(self) -> (i32, UpdateEntry) {
        (
            self.id,
            UpdateEntry {
                title: self.title,
                description: self.description,
                image: self.image,
                url: self.url,
                entry_type: self.entry_type,
                rating: self.rating,
                sequence: self.sequence,
            },
        )
    }
}

/// Request body for updating a batch of entries.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEntriesRequest {
    #[validate(nested)]
    pub change: Vec<ChangeEntryRequest>,
}

/// Request body for deleting a batch of entries by id.
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteEntriesRequest {
    pub delete: Vec<i32>,
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct EntriesCreatedResponse {
    pub created: usize,
}

#[derive(Debug, Serialize)]
pub struct EntriesUpdatedResponse {
    pub updated: usize,
}

#[derive(Debug, Serialize)]
pub struct EntriesDeletedResponse {
    pub deleted: usize,
}

/// Response body for a single entry.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub rating: Option<i32>,
    pub sequence: Option<i32>,
}

impl From<Entry> for EntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            title: entry.title,
            description: entry.description,
            image: entry.image,
            url: entry.url,
            entry_type: entry.entry_type,
            rating: entry.rating,
            sequence: entry.sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_batch_deserializes() {
        let request: CreateEntriesRequest = serde_json::from_str(
            r#"{"new": [
                {"title": "asdf title", "description": "asdf description", "type": "link"},
                {"title": "zxcv title", "image": "zxcv.jpg", "type": "divider"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(request.new.len(), 2);
        assert_eq!(request.new[1].entry_type, EntryType::Divider);
    }

    #[test]
    fn missing_type_is_rejected() {
        let result: Result<CreateEntriesRequest, _> =
            serde_json::from_str(r#"{"new": [{"title": "yes"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let result: Result<CreateEntriesRequest, _> =
            serde_json::from_str(r#"{"new": [{"title": "yes", "type": "flargen"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_id_in_change_is_rejected() {
        let result: Result<UpdateEntriesRequest, _> =
            serde_json::from_str(r#"{"change": [{"title": "yes"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn nested_validation_reports_the_offending_item() {
        let request: CreateEntriesRequest =
            serde_json::from_str(r#"{"new": [{"title": "", "type": "link"}]}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn entry_json_uses_the_type_field_name() {
        let response = EntryResponse {
            id: 7,
            title: "t".to_string(),
            description: None,
            image: None,
            url: None,
            entry_type: EntryType::TextBox,
            rating: Some(5),
            sequence: Some(1),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"type\":\"text_box\""));
        assert!(!json.contains("entry_type"));
    }

    #[test]
    fn change_request_splits_into_id_and_changeset() {
        let request: UpdateEntriesRequest = serde_json::from_str(
            r#"{"change": [{"id": 3, "title": "new title", "type": "text_box"}]}"#,
        )
        .unwrap();
        let (id, update) = request.change.into_iter().next().unwrap().into_update();
        assert_eq!(id, 3);
        assert_eq!(update.title.as_deref(), Some("new title"));
        assert_eq!(update.entry_type, Some(EntryType::TextBox));
        assert!(update.rating.is_none());
    }
}
