pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Shared state for the whole application
pub struct AppState {
    pub catalog: store::CatalogStore,
}

impl AppState {
    pub fn new(catalog: store::CatalogStore) -> Arc<Self> {
        Arc::new(AppState { catalog })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Spotbook API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .merge(controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
