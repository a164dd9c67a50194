use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::acrostic::ValidationError;
use crate::curation::response_parser::MarkerParseError;
use crate::curation::store::StoreError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Model output could not be parsed: {0}")]
    MarkerParse(#[from] MarkerParseError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details: Option<Value> = None;

        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::InvalidBody(rejection) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                rejection.body_text(),
            ),
            AppError::Validation(e @ ValidationError::MissingField { .. })
            | AppError::Validation(e @ ValidationError::InvalidKeyword(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Validation(e) => {
                tracing::warn!("Acrostic validation failed: {e}");
                if let Some((expected, detected)) = e.initials() {
                    details = Some(json!({ "expected": expected, "detected": detected }));
                }
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "ACROSTIC_MISMATCH",
                    e.to_string(),
                )
            }
            AppError::MarkerParse(e) => {
                tracing::warn!("Model output parse failed: {e}");
                (StatusCode::BAD_GATEWAY, "MODEL_OUTPUT_ERROR", e.to_string())
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    format!("The teacher model call failed: {e}"),
                )
            }
            AppError::Store(e @ (StoreError::NotFound(_) | StoreError::IndexOutOfRange { .. })) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string())
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    e.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;
    use crate::curation::models::ExampleId;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_mismatch_reports_expected_and_detected() {
        let (status, body) = render(AppError::Validation(ValidationError::Mismatch {
            expected: "ADAPTIVE".to_string(),
            detected: "ADAOTIVE".to_string(),
        }))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "ACROSTIC_MISMATCH");
        assert_eq!(body["error"]["details"]["expected"], "ADAPTIVE");
        assert_eq!(body["error"]["details"]["detected"], "ADAOTIVE");
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request_without_details() {
        let (status, body) =
            render(ValidationError::MissingField { field: "critique" }.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn test_marker_parse_is_bad_gateway() {
        let (status, body) = render(
            MarkerParseError::MissingMarker {
                marker: "Rewrite:",
            }
            .into(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "MODEL_OUTPUT_ERROR");
    }

    #[tokio::test]
    async fn test_store_not_found_is_404() {
        let (status, _) = render(StoreError::NotFound(ExampleId::new()).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_llm_api_error_is_reported() {
        let (status, body) = render(
            LlmError::Api {
                status: 401,
                message: "bad key".to_string(),
            }
            .into(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("bad key"));
    }
}
