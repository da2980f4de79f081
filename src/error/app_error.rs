use thiserror::Error;

/// Application-wide error type covering every failure the service reports.
///
/// Authorization failures are deliberately split between `Unauthorized`
/// (no session binding where one is required) and `Forbidden` (a binding
/// exists but does not match the target repo).
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Duplicate entry error for unique constraint violations
    #[error("Duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// Validation error for a single field
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Collected field-level validation errors, reported together
    #[error("Validation failed for {} field(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Unauthenticated access error (no credential/session where required)
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Forbidden access error (credential/session present but wrong)
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

/// A single field violation inside a `ValidationErrors` report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

impl AppError {
    /// Shorthand for a `NotFound` on a repo access key.
    pub fn repo_not_found(key: &str) -> Self {
        AppError::NotFound {
            entity: "repo".to_string(),
            field: "access_key".to_string(),
            value: key.to_string(),
        }
    }

    /// Wraps a connection pool checkout failure.
    pub fn pool<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        AppError::ConnectionPool {
            source: anyhow::Error::new(source),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        crate::error::DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(error: argon2::password_hash::Error) -> Self {
        AppError::Internal {
            source: anyhow::anyhow!("passphrase hashing failed: {error}"),
        }
    }
}

impl From<argon2::password_hash::phc::Error> for AppError {
    fn from(error: argon2::password_hash::phc::Error) -> Self {
        AppError::Internal {
            source: anyhow::anyhow!("passphrase hashing failed: {error}"),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut collected = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for {field}"));
                collected.push(ValidationFieldError {
                    field: field.to_string(),
                    message,
                });
            }
        }
        collected.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors: collected }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(max = 5, message = "too long"))]
        title: String,
        #[validate(length(max = 3, message = "way too long"))]
        description: String,
    }

    #[test]
    fn collects_every_field_violation() {
        let probe = Probe {
            title: "oversized".to_string(),
            description: "also oversized".to_string(),
        };
        let err = AppError::from(probe.validate().unwrap_err());
        match err {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "description");
                assert_eq!(errors[0].message, "way too long");
                assert_eq!(errors[1].field, "title");
                assert_eq!(errors[1].message, "too long");
            }
            other => panic!("expected ValidationErrors, got {other:?}"),
        }
    }

    #[test]
    fn valid_input_produces_no_error() {
        let probe = Probe {
            title: "ok".to_string(),
            description: "ok".to_string(),
        };
        assert!(probe.validate().is_ok());
    }
}
