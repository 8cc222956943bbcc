//! Pulse Functions
//!
//! HTTP-triggered functions for keeping repositories active.
//!
//! Architecture:
//! - Configuration: settings loaded once from the environment
//! - Credentials: bearer token lookup (Secret Manager or environment)
//! - Repositories: GitHub GraphQL access behind a trait
//! - Services: the empty-commit workflow and the unrelated greeting
//! - API: axum handlers turning service results into plain-text responses

pub mod api;
pub mod config;
pub mod credentials;
pub mod repository;
pub mod service;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use pulse_client::GitHubClient;

use crate::api::AppState;
use crate::config::Config;
use crate::service::EmptyCommitService;

/// Name the empty-commit function logs under
pub const EMPTY_COMMIT_FUNCTION: &str = "git-commit-function";

/// Name the greeting function logs under
pub const HELLO_FUNCTION: &str = "hello-world-function";

/// Build the full application router from configuration
///
/// The HTTP client is created once here and shared by every invocation.
pub fn build_app(config: &Config) -> anyhow::Result<Router> {
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .user_agent(concat!("pulse-functions/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let github = Arc::new(GitHubClient::with_client(
        config.graphql_url.clone(),
        http.clone(),
    ));
    let credentials = credentials::from_config(config, http);

    let span = tracing::info_span!("function", function = EMPTY_COMMIT_FUNCTION);
    let service = EmptyCommitService::new(config, credentials, github, span);

    Ok(api::create_router(AppState::new(service)))
}
