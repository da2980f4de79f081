//! Error response DTOs.

use serde::Serialize;

use crate::error::ValidationFieldError;

/// Standard error response format.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }

    /// Adds structured details to the error response.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }

    /// Builds the field-keyed validation error map: every violation is
    /// reported together rather than failing fast on the first bad field.
    pub fn validation_errors(errors: &[ValidationFieldError]) -> Self {
        let map: serde_json::Map<String, serde_json::Value> = errors
            .iter()
            .map(|e| (e.field.clone(), serde_json::Value::from(e.message.clone())))
            .collect();
        Self::new("VALIDATION_ERROR", "Validation failed")
            .with_details(serde_json::Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_build_a_field_keyed_map() {
        let errors = vec![
            ValidationFieldError {
                field: "title".to_string(),
                message: "Title must be at most 50 characters".to_string(),
            },
            ValidationFieldError {
                field: "description".to_string(),
                message: "Description must be at most 300 characters".to_string(),
            },
        ];
        let response = ErrorResponse::validation_errors(&errors);
        let details = response.details.unwrap();
        assert_eq!(
            details["title"],
            "Title must be at most 50 characters"
        );
        assert_eq!(
            details["description"],
            "Description must be at most 300 characters"
        );
    }

    #[test]
    fn details_and_request_id_are_omitted_when_absent() {
        let json = serde_json::to_string(&ErrorResponse::new("NOT_FOUND", "missing")).unwrap();
        assert!(!json.contains("details"));
        assert!(!json.contains("request_id"));
    }
}
