//! Conversion of diesel errors into structured `AppError` values.
//!
//! Constraint violations carry their table/constraint names through
//! diesel's `DatabaseErrorInformation`; this module maps them onto the
//! error taxonomy so callers can react (e.g. retry access-key generation
//! on a duplicate key) without inspecting driver strings.

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

use crate::error::AppError;

pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a diesel error into an `AppError`, attaching the operation
    /// name for context on unexpected failures.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::NotFound => AppError::NotFound {
                entity: "record".to_string(),
                field: "id".to_string(),
                value: String::new(),
            },
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::new(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let entity = info.table_name().unwrap_or("record").to_string();
        let field = info
            .column_name()
            .or_else(|| info.constraint_name())
            .unwrap_or("unknown")
            .to_string();

        match kind {
            DatabaseErrorKind::UniqueViolation => AppError::Duplicate {
                entity,
                field,
                value: info.details().unwrap_or("").to_string(),
            },
            DatabaseErrorKind::ForeignKeyViolation => AppError::BadRequest {
                message: format!("{entity}.{field} references a missing record"),
            },
            DatabaseErrorKind::CheckViolation => AppError::Validation {
                field,
                reason: info.message().to_string(),
            },
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::anyhow!("{}", info.message()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeInfo {
        message: &'static str,
        table: Option<&'static str>,
        column: Option<&'static str>,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for FakeInfo {
        fn message(&self) -> &str {
            self.message
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            self.table
        }
        fn column_name(&self) -> Option<&str> {
            self.column
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn unique_violation_becomes_duplicate() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(FakeInfo {
                message: "duplicate key value violates unique constraint",
                table: Some("repos"),
                column: None,
                constraint: Some("repos_pkey"),
            }),
        );
        match DatabaseErrorConverter::convert_diesel_error(error, "insert repo") {
            AppError::Duplicate { entity, field, .. } => {
                assert_eq!(entity, "repos");
                assert_eq!(field, "repos_pkey");
            }
            other => panic!("expected Duplicate, got {other:?}"),
        }
    }

    #[test]
    fn not_found_maps_to_not_found() {
        match DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "select") {
            AppError::NotFound { .. } => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn check_violation_becomes_validation() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation,
            Box::new(FakeInfo {
                message: "violates check constraint",
                table: Some("entries"),
                column: Some("entry_type"),
                constraint: None,
            }),
        );
        match DatabaseErrorConverter::convert_diesel_error(error, "insert entry") {
            AppError::Validation { field, .. } => assert_eq!(field, "entry_type"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
