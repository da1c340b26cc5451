//! GET /test: reports store reachability for operational debugging.
//!
//! Always answers 200. Failures are folded into the report text.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::AppState;

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for DiagnosticsReport {
    fn default() -> Self {
        Self {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: None,
            database_name: None,
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }
}

fn presence(set: bool) -> Option<String> {
    Some(if set { "✅ Set" } else { "❌ Not Set" }.to_string())
}

fn truncate(message: &str, max_chars: usize) -> String {
    message.chars().take(max_chars).collect()
}

pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let mut report = DiagnosticsReport::default();

    match state.store() {
        Ok(store) => {
            report.database = "✅ Available".to_string();
            report.database_url = Some("✅ Configured".to_string());
            report.database_name = Some(store.name().to_string());
            report.connection_status = "Connected".to_string();

            match store.list_collection_names().await {
                Ok(mut names) => {
                    names.truncate(MAX_COLLECTIONS);
                    report.collections = names;
                    report.database = "✅ Connected & Working".to_string();
                }
                Err(e) => {
                    tracing::warn!("Diagnostics could not list collections: {}", e);
                    report.database = format!(
                        "⚠️  Connected but Error: {}",
                        truncate(&e.to_string(), MAX_ERROR_CHARS)
                    );
                }
            }
        }
        Err(_) => {
            report.database = "⚠️  Available but not initialized".to_string();
        }
    }

    // Presence only; values are never echoed.
    report.database_url = presence(state.config.database_url_set());
    report.database_name = presence(state.config.database_name_set());

    Json(report)
}
