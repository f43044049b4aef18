//! HTTP boundary: router, shared state, error contract, cache headers.

pub mod cache;
pub mod error;
pub mod resolution_routes;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::source::NumberSource;
use crate::store::MeaningStore;

/// Shared state for the resolution routes
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MeaningStore>,
    pub source: Arc<dyn NumberSource>,
}

impl AppState {
    pub fn new(store: Arc<dyn MeaningStore>, source: Arc<dyn NumberSource>) -> Self {
        Self { store, source }
    }
}

/// Build the full axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/resolution/random",
            get(resolution_routes::random_resolution),
        )
        .route(
            "/resolution/meanings",
            get(resolution_routes::list_meanings),
        )
        // Paths the existing UI already calls
        .route("/api/v1/random", get(resolution_routes::random_resolution))
        .route("/api/v1/smorfia", get(resolution_routes::list_meanings))
        .route("/health", get(resolution_routes::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(middleware::from_fn(cache::no_store)),
        )
        .with_state(state)
}
