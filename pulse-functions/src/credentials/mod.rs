//! Credential providers
//!
//! A provider hands out the bearer token used for GitHub API calls. The token
//! is fetched fresh on every invocation so a rotated secret takes effect
//! without a restart.
//!
//! Implementations must never log the token or put it in an error.

mod secret_manager;
mod static_token;

pub use secret_manager::SecretManagerProvider;
pub use static_token::StaticTokenProvider;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Config;

/// Errors from credential lookup
#[derive(Debug, Error)]
pub enum CredentialError {
    /// A setting required to locate the secret is missing
    #[error("{0} not set")]
    MissingConfiguration(&'static str),

    /// The secret store could not be reached or refused the request
    #[error("failed to access secret: {0}")]
    Unreachable(String),

    /// The secret (or its latest version) does not exist
    #[error("secret not found: {0}")]
    NotFound(String),

    /// The secret exists but its payload is unusable as a token
    #[error("invalid secret payload: {0}")]
    InvalidPayload(String),
}

/// Source of the GitHub bearer token
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the current token
    async fn get_token(&self) -> Result<String, CredentialError>;
}

/// Picks the provider matching the configuration
///
/// A token in the environment wins; otherwise the token is read from
/// Secret Manager using the shared HTTP client.
pub fn from_config(config: &Config, http: reqwest::Client) -> Arc<dyn CredentialProvider> {
    match &config.static_token {
        Some(token) => {
            tracing::info!("Using GitHub token from environment");
            Arc::new(StaticTokenProvider::new(token.clone()))
        }
        None => Arc::new(SecretManagerProvider::new(
            http,
            config.project_id.clone(),
            config.token_secret.clone(),
        )),
    }
}
