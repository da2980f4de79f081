use crate::error::{AppError, AppResult};
use axum::extract::{FromRequest, Json, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that rejects with a 400 on malformed bodies and runs the
/// DTO's `validator` rules, collecting field violations into one error map.
///
/// axum's stock `Json` rejection reports type mismatches as 422; the API
/// contract wants every malformed body as a 400, so the rejection is routed
/// through `AppError::BadRequest` instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(max = 50, message = "Title must be at most 50 characters"))]
        title: String,
        #[validate(length(max = 300, message = "Description must be at most 300 characters"))]
        description: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let request = json_request(r#"{"title": "ok", "description": "fine"}"#);
        let result = ValidatedJson::<TestBody>::from_request(request, &()).await;

        assert!(result.is_ok());
        let ValidatedJson(body) = result.unwrap();
        assert_eq!(body.title, "ok");
    }

    #[tokio::test]
    async fn test_oversize_fields_collected_together() {
        let long_title = "x".repeat(51);
        let long_description = "y".repeat(301);
        let request = json_request(&format!(
            r#"{{"title": "{long_title}", "description": "{long_description}"}}"#
        ));

        let result = ValidatedJson::<TestBody>::from_request(request, &()).await;

        match result.unwrap_err() {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"title"));
                assert!(fields.contains(&"description"));
            }
            other => panic!("Expected ValidationErrors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_type_mismatch_is_bad_request() {
        let request = json_request(r#"{"title": 5000, "description": "fine"}"#);
        let result = ValidatedJson::<TestBody>::from_request(request, &()).await;

        match result.unwrap_err() {
            AppError::BadRequest { message } => assert!(!message.is_empty()),
            other => panic!("Expected BadRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = json_request("{not json");
        let result = ValidatedJson::<TestBody>::from_request(request, &()).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::BadRequest { .. }
        ));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .body(Body::from(r#"{"title": "a", "description": "b"}"#))
            .unwrap();

        let result = ValidatedJson::<TestBody>::from_request(request, &()).await;
        assert!(matches!(result.unwrap_err(), AppError::BadRequest { .. }));
    }
}
