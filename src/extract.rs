use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::schemas::{FieldError, ValidationErrors};

/// A JSON request body.
///
/// Requests that omit `Content-Type` are still parsed as JSON; a declared
/// non-JSON type is rejected.
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.headers().contains_key(header::CONTENT_TYPE) {
            let Json(value) = Json::<Value>::from_request(req, state).await?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| invalid_json(rejection.body_text()))?;
        let value = serde_json::from_slice(&bytes).map_err(|e| invalid_json(e.to_string()))?;
        Ok(Self(value))
    }
}

fn invalid_json(msg: String) -> ApiError {
    ApiError::Validation(ValidationErrors::single(FieldError::body(
        None,
        "json_invalid",
        msg,
    )))
}
