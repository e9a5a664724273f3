use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Request body was missing or carried no fields.
    #[error("No data provided")]
    NoData,

    /// Body could not be parsed into a product payload.
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    /// One message per violated field rule.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoData | Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            Self::NoData => json!({ "error": "No data provided" }),
            Self::BadRequest(details) => json!({
                "error": "Invalid request body",
                "details": details,
            }),
            Self::Validation(details) => json!({
                "error": "Validation failed",
                "details": details,
            }),
            Self::NotFound(_) => json!({ "error": self.to_string() }),
            Self::Internal(details) => {
                tracing::error!(error = %details, "Request failed");
                json!({
                    "error": "Internal server error",
                    "details": details,
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Turns a handler panic into the generic 500 body.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(details).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn display_messages() {
        assert_eq!(AppError::NoData.to_string(), "No data provided");
        assert_eq!(
            AppError::NotFound("Product".to_string()).to_string(),
            "Product not found"
        );
        assert_eq!(
            AppError::Validation(vec!["a".into(), "b".into()]).to_string(),
            "Validation failed: a; b"
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(AppError::NoData.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Validation(vec![]).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("Product".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn validation_body_lists_details() {
        let (status, body) =
            body_of(AppError::Validation(vec!["Title is required".into()])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"][0], "Title is required");
    }

    #[tokio::test]
    async fn not_found_body() {
        let (status, body) = body_of(AppError::NotFound("Product".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Product not found");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn internal_body_carries_description() {
        let (status, body) = body_of(AppError::Internal("lock poisoned".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["details"], "lock poisoned");
    }

    #[tokio::test]
    async fn panic_payload_becomes_internal_error() {
        let response = panic_response(Box::new("index out of bounds"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["details"], "index out of bounds");
    }
}
