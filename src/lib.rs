pub mod config;
pub mod db;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod health;
pub mod leads;
pub mod schemas;
pub mod server;
pub mod testimonials;

use std::sync::Arc;

use crate::config::Config;
use crate::db::{DocumentStore, StoreError};

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    store: Option<Arc<dyn DocumentStore>>,
}

impl AppState {
    pub fn new(config: Config, store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// The store handle, or `NotInitialized` when startup could not build one.
    pub fn store(&self) -> Result<&dyn DocumentStore, StoreError> {
        self.store.as_deref().ok_or(StoreError::NotInitialized)
    }
}
