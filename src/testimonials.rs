use axum::{
    Json,
    extract::{Query, State},
};
use axum_extra::extract::WithRejection;
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    db::get_documents,
    error::{ApiError, ApiResult},
    schemas::{Schema, Testimonial},
};

const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct TestimonialsQuery {
    // Unsigned: negative or oversized values fail to parse and come back
    // as a 422 without touching the store.
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TestimonialsResponse {
    pub items: Vec<Testimonial>,
}

/// GET /api/testimonials
///
/// Falls back to placeholder content when the collection yields nothing.
pub async fn list_testimonials(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<TestimonialsQuery>, ApiError>,
) -> ApiResult<Json<TestimonialsResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let store = state.store()?;
    let docs = get_documents(store, Testimonial::COLLECTION, doc! {}, limit).await?;

    let mut items: Vec<Testimonial> = docs.iter().map(Testimonial::from_document).collect();
    if items.is_empty() {
        items = Testimonial::placeholders();
    }
    items.truncate(limit as usize);

    Ok(Json(TestimonialsResponse { items }))
}
