pub mod queries;
pub mod store;

#[cfg(test)]
pub mod memory;

use std::time::Duration;

use mongodb::{Client, Database, bson::doc};

use crate::config::Config;

pub use queries::{create_document, get_documents};
pub use store::{DocumentStore, MongoStore, StoreError};

const STARTUP_PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Create MongoDB client. Parsing the URI does not open a connection.
pub async fn create_client(uri: &str) -> Result<Client, StoreError> {
    let client = Client::with_uri_str(uri).await?;
    Ok(client)
}

/// Get database handle
pub fn get_database(client: &Client, db_name: &str) -> Database {
    client.database(db_name)
}

/// Build the store handle once at startup.
///
/// Missing or invalid settings leave the store uninitialized instead of
/// aborting the process; requests that need it then fail individually.
pub async fn connect(config: &Config) -> Option<MongoStore> {
    let (Some(url), Some(name)) = (&config.database_url, &config.database_name) else {
        tracing::warn!("DATABASE_URL or DATABASE_NAME not set, database disabled");
        return None;
    };

    let client = match create_client(url).await {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!("Invalid MongoDB configuration, database disabled: {}", e);
            return None;
        }
    };

    let database = get_database(&client, name);

    match tokio::time::timeout(
        STARTUP_PING_TIMEOUT,
        client.database("admin").run_command(doc! {"ping": 1}),
    )
    .await
    {
        Ok(Ok(_)) => tracing::info!("Successfully connected to MongoDB database {}", name),
        Ok(Err(e)) => tracing::warn!("MongoDB ping failed, continuing without it: {}", e),
        Err(_) => tracing::warn!(
            "MongoDB ping timed out after {:?}, continuing without it",
            STARTUP_PING_TIMEOUT
        ),
    }

    Some(MongoStore::new(database))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_without_settings() {
        assert!(connect(&Config::default()).await.is_none());
    }

    #[tokio::test]
    async fn test_connect_with_only_url() {
        let config = Config {
            database_url: Some("mongodb://127.0.0.1:27017".to_string()),
            ..Config::default()
        };
        assert!(connect(&config).await.is_none());
    }

    #[tokio::test]
    async fn test_connect_with_invalid_url() {
        let config = Config {
            database_url: Some("not-a-mongo-url".to_string()),
            database_name: Some("northmann".to_string()),
            ..Config::default()
        };
        assert!(connect(&config).await.is_none());
    }

    #[tokio::test]
    async fn test_connect_keeps_unreachable_handle() {
        let config = Config {
            database_url: Some(memory::UNREACHABLE_URI.to_string()),
            database_name: Some("northmann".to_string()),
            ..Config::default()
        };
        let store = connect(&config).await.expect("handle should be created");
        assert_eq!(store.name(), "northmann");
    }
}
