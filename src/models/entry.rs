//! Entry models and the closed entry type enum.

use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// The kind of content an entry holds.
///
/// Closed set: any other wire value fails deserialization at the boundary
/// (400) instead of being coerced to a default.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow, Default,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    #[default]
    Link,
    TextBox,
    Divider,
}

impl EntryType {
    /// Canonical wire/database spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Link => "link",
            EntryType::TextBox => "text_box",
            EntryType::Divider => "divider",
        }
    }
}

impl diesel::query_builder::QueryId for EntryType {
    type QueryId = EntryType;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for EntryType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for EntryType {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "link" => Ok(EntryType::Link),
            "text_box" => Ok(EntryType::TextBox),
            "divider" => Ok(EntryType::Divider),
            _ => Err(format!("Unrecognized entry_type: {}", s).into()),
        }
    }
}

/// Entry query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Entry {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub entry_type: EntryType,
    pub rating: Option<i32>,
    pub sequence: Option<i32>,
    pub repo_access_key: String,
}

/// NewEntry insert model for INSERT operations
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::entries)]
pub struct NewEntry {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub entry_type: EntryType,
    pub rating: Option<i32>,
    pub sequence: Option<i32>,
    pub repo_access_key: String,
}

/// UpdateEntry model for partial UPDATE operations.
///
/// `repo_access_key` is deliberately absent: entry ownership is immutable.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::entries)]
pub struct UpdateEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub entry_type: Option<EntryType>,
    pub rating: Option<i32>,
    pub sequence: Option<i32>,
}

impl UpdateEntry {
    /// True when the change set carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.url.is_none()
            && self.entry_type.is_none()
            && self.rating.is_none()
            && self.sequence.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_type_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_string(&EntryType::TextBox).unwrap(),
            "\"text_box\""
        );
        assert_eq!(serde_json::to_string(&EntryType::Link).unwrap(), "\"link\"");
        assert_eq!(
            serde_json::to_string(&EntryType::Divider).unwrap(),
            "\"divider\""
        );
    }

    #[test]
    fn entry_type_rejects_unknown_values() {
        let result: Result<EntryType, _> = serde_json::from_str("\"flargen\"");
        assert!(result.is_err());
    }

    #[test]
    fn entry_type_round_trips() {
        for variant in [EntryType::Link, EntryType::TextBox, EntryType::Divider] {
            let json = serde_json::to_string(&variant).unwrap();
            let back: EntryType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, variant);
            assert_eq!(json, format!("\"{}\"", variant.as_str()));
        }
    }

    #[test]
    fn default_type_is_link() {
        assert_eq!(EntryType::default(), EntryType::Link);
    }
}
