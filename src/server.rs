//! Router assembly and process lifecycle.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    AppState,
    config::Config,
    db::{self, DocumentStore},
    diagnostics, error, health, leads, testimonials,
};

/// Build the router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Public marketing site: mirror any origin and allow credentials.
    let cors = CorsLayer::very_permissive();

    Router::new()
        .route("/", get(health::root))
        .route("/api/hello", get(health::hello))
        .route("/test", get(diagnostics::test_database))
        .route("/api/leads", post(leads::create_lead))
        .route("/api/newsletter", post(leads::subscribe))
        .route("/api/testimonials", get(testimonials::list_testimonials))
        .fallback(error::not_found)
        .method_not_allowed_fallback(error::method_not_allowed)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Connect the store, bind, and serve until a shutdown signal arrives.
pub async fn run(config: Config) -> Result<()> {
    let store = db::connect(&config)
        .await
        .map(|store| Arc::new(store) as Arc<dyn DocumentStore>);

    let addr = config.bind_addr();
    let app = create_router(AppState::new(config, store));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::warn!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::warn!("Received SIGTERM, shutting down"),
    }
}
