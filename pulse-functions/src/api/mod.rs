//! API Module
//!
//! HTTP layer for the functions. Each submodule handles one endpoint.

pub mod empty_commit;
pub mod error;
pub mod health;
pub mod hello;

use std::sync::Arc;

use axum::{
    Router,
    routing::{any, get},
};
use tower_http::trace::TraceLayer;

use crate::service::EmptyCommitService;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub empty_commit: Arc<EmptyCommitService>,
}

impl AppState {
    pub fn new(empty_commit: EmptyCommitService) -> Self {
        Self {
            empty_commit: Arc::new(empty_commit),
        }
    }
}

/// Create the main API router with all endpoints
///
/// The function endpoints accept any method so schedulers can use whichever
/// verb they default to.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Empty commit function
        .route("/", any(empty_commit::empty_commit))
        .route("/empty-commit", any(empty_commit::empty_commit))
        // Greeting function
        .route("/hello", any(hello::hello))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
