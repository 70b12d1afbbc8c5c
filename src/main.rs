// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! EcoLog API Server
//!
//! Records eco-friendly actions, derives their environmental impact, and
//! serves dashboard metrics and leaderboards.

use ecolog::{
    config::{Config, StorageBackend},
    store::{FirestoreStore, MemoryStore, Store},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        backend = %config.storage_backend,
        "Starting EcoLog API"
    );

    // Select the action store backend
    let store = match config.storage_backend {
        StorageBackend::Firestore => {
            let db = FirestoreStore::new(&config.gcp_project_id)
                .await
                .expect("Failed to connect to Firestore");
            Store::Firestore(db)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-process store; data will not survive a restart");
            Store::Memory(MemoryStore::new())
        }
    };

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
    });

    // Build router
    let app = ecolog::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ecolog=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
