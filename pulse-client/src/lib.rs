//! Pulse GitHub Client
//!
//! A small, typed client for the two GitHub GraphQL operations Pulse needs:
//! reading a repository's default branch tip and creating a verified commit
//! on top of it.
//!
//! Every call performs exactly one HTTP request. Nothing is retried here;
//! callers decide what a failure means.
//!
//! # Example
//!
//! ```no_run
//! use pulse_client::GitHubClient;
//! use pulse_core::domain::address::RepositoryAddress;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubClient::new(pulse_client::GRAPHQL_ENDPOINT, Duration::from_secs(10))?;
//! let address = RepositoryAddress::parse("octo/demo")?;
//!
//! let info = client.get_repository_info("ghp_token", &address).await?;
//! println!("{} is at {}", address, info.head_sha);
//! # Ok(())
//! # }
//! ```

mod commits;
pub mod error;
mod repository;

// Re-export commonly used types
pub use error::{ClientError, Result};

use std::time::Duration;

use pulse_core::dto::graphql::{GraphQLRequest, GraphQLResponse};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Public GitHub GraphQL endpoint
pub const GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

/// Per-request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// User-Agent header sent with every request (GitHub rejects requests without one)
const USER_AGENT: &str = concat!("pulse-functions/", env!("CARGO_PKG_VERSION"));

/// Maximum number of body bytes kept when reporting a non-2xx response
const ERROR_BODY_LIMIT: usize = 1024;

/// HTTP client for the GitHub GraphQL API
///
/// The client holds no credentials. A bearer token is passed to each call so
/// the token's lifetime stays with the invocation that fetched it.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// GraphQL endpoint URL
    endpoint: String,
    /// HTTP client instance
    client: Client,
}

impl GitHubClient {
    /// Create a client whose every request is bounded by `timeout`
    ///
    /// # Arguments
    /// * `endpoint` - The GraphQL endpoint (usually [`GRAPHQL_ENDPOINT`])
    /// * `timeout` - Upper bound for each request, connection included
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self::with_client(endpoint, client))
    }

    /// Create a client with a preconfigured reqwest `Client`
    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// Get the GraphQL endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    // =============================================================================
    // Request Execution
    // =============================================================================

    /// POST a GraphQL document and decode the response envelope
    ///
    /// Non-2xx statuses become [`ClientError::HttpStatus`]. The envelope's
    /// `errors` list is left for the caller to interpret.
    async fn execute<V, T>(
        &self,
        token: &str,
        query: &'static str,
        variables: V,
    ) -> Result<GraphQLResponse<T>>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&GraphQLRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                message: truncate_body(body, ERROR_BODY_LIMIT),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Cut `body` to at most `limit` bytes without splitting a character
fn truncate_body(mut body: String, limit: usize) -> String {
    if body.len() > limit {
        let mut end = limit;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body
}
