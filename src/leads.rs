//! Form submissions: contact leads and newsletter signups.

use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::Value;

use crate::{
    AppState,
    db::create_document,
    error::ApiResult,
    extract::JsonBody,
    schemas::{Lead, Newsletter, Schema},
};

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub status: &'static str,
    pub id: String,
}

/// Validate `body` as `T` and persist it. Nothing touches the store unless
/// validation passes.
async fn submit<T: Schema>(state: &AppState, body: &Value) -> ApiResult<Json<CreatedResponse>> {
    let record = T::validate(body)?;
    let store = state.store()?;
    let id = create_document(store, T::COLLECTION, &record).await?;

    tracing::info!("Stored {} {}", T::COLLECTION, id);
    Ok(Json(CreatedResponse { status: "ok", id }))
}

/// POST /api/leads
pub async fn create_lead(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<Json<CreatedResponse>> {
    submit::<Lead>(&state, &body).await
}

/// POST /api/newsletter
pub async fn subscribe(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<Json<CreatedResponse>> {
    submit::<Newsletter>(&state, &body).await
}
