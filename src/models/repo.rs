use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Deserialize;

/// Repo model for reading from database.
///
/// The `pass_phrase` column holds an Argon2id PHC hash; it never leaves the
/// model layer (response DTOs are built without it).
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::repos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Repo {
    pub access_key: String,
    pub pass_phrase: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_private: bool,
    pub last_visited: NaiveDateTime,
}

/// NewRepo model for inserting new records.
///
/// `access_key` is generated and `pass_phrase` is already hashed by the time
/// this struct is built; `last_visited` falls back to the column default.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::repos)]
pub struct NewRepo {
    pub access_key: String,
    pub pass_phrase: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_private: bool,
}

/// UpdateRepo model for partial updates with optional fields.
#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::repos)]
pub struct UpdateRepo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_private: Option<bool>,
}

impl UpdateRepo {
    /// True when no field was provided at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.is_private.is_none()
    }
}
