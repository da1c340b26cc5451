use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Database,
    bson::{Bson, Document},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database not available. Check DATABASE_URL and DATABASE_NAME environment variables.")]
    NotInitialized,

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    #[error("failed to serialize document: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),
}

/// The operations the service needs from a document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Database name, for diagnostics.
    fn name(&self) -> &str;

    /// Insert one document and return its generated id.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<String, StoreError>;

    /// Documents matching `filter`, at most `limit`, in store order.
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        limit: u32,
    ) -> Result<Vec<Document>, StoreError>;

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError>;
}

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn name(&self) -> &str {
        self.db.name()
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        let result = self
            .db
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;

        Ok(id_to_string(result.inserted_id))
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        limit: u32,
    ) -> Result<Vec<Document>, StoreError> {
        let cursor = self
            .db
            .collection::<Document>(collection)
            .find(filter)
            .limit(i64::from(limit))
            .await?;

        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.db.list_collection_names().await?)
    }
}

pub(crate) fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}
