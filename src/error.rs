//! HTTP error mapping for the API.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;
use crate::schemas::{FieldError, ValidationErrors};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected before any store access (422)
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Store unreachable or operation rejected (500, logged)
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                tracing::debug!("Rejected request: {}", errors);
                let body = Json(json!({ "detail": errors.errors() }));
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
            ApiError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                let body = Json(json!({ "detail": e.to_string() }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    let body = Json(json!({ "detail": "Not Found" }));
    (StatusCode::NOT_FOUND, body).into_response()
}

/// Router fallback for a known path hit with the wrong method.
pub async fn method_not_allowed() -> Response {
    let body = Json(json!({ "detail": "Method Not Allowed" }));
    (StatusCode::METHOD_NOT_ALLOWED, body).into_response()
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::MissingJsonContentType(_) => "content_type",
            _ => "json_invalid",
        };
        ApiError::Validation(ValidationErrors::single(FieldError::body(
            None,
            kind,
            rejection.body_text(),
        )))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(ValidationErrors::single(FieldError::query(
            "int_parsing",
            rejection.body_text(),
        )))
    }
}
