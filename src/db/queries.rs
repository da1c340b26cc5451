use mongodb::bson::{self, DateTime, Document};
use serde::Serialize;

use super::store::{DocumentStore, StoreError};

/// Insert a record into `collection`, stamping creation and update times.
pub async fn create_document<T: Serialize>(
    store: &dyn DocumentStore,
    collection: &str,
    record: &T,
) -> Result<String, StoreError> {
    let mut document = bson::to_document(record)?;
    let now = DateTime::now();
    document.insert("created_at", now);
    document.insert("updated_at", now);

    let id = store.insert_one(collection, document).await?;
    tracing::debug!("Inserted document {} into {}", id, collection);
    Ok(id)
}

/// Fetch up to `limit` documents matching `filter`.
///
/// A zero limit short-circuits: the driver would read it as "no limit".
pub async fn get_documents(
    store: &dyn DocumentStore,
    collection: &str,
    filter: Document,
    limit: u32,
) -> Result<Vec<Document>, StoreError> {
    if limit == 0 {
        return Ok(Vec::new());
    }
    store.find(collection, filter, limit).await
}
