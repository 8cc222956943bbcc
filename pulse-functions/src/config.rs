//! Function configuration
//!
//! All settings come from the environment and are read once at startup.
//! Per-invocation code only ever sees the resulting [`Config`].

use std::time::Duration;

use pulse_core::domain::commit::{DEFAULT_BRANCH, DEFAULT_MESSAGE_PREFIX};

/// Secret Manager secret holding the GitHub token
pub const DEFAULT_TOKEN_SECRET: &str = "github_token";

/// Function configuration
#[derive(Clone)]
pub struct Config {
    /// Raw `owner/name` string; validated on every invocation
    pub github_repo: Option<String>,

    /// Branch the empty commit lands on
    pub branch: String,

    /// Google Cloud project hosting the token secret
    pub project_id: Option<String>,

    /// Name of the secret holding the GitHub token
    pub token_secret: String,

    /// Token supplied directly through the environment (local runs)
    pub static_token: Option<String>,

    /// GitHub GraphQL endpoint
    pub graphql_url: String,

    /// Prefix of every commit headline
    pub commit_message_prefix: String,

    /// Upper bound for each outbound request
    pub request_timeout: Duration,

    /// Address the HTTP server binds to
    pub bind_addr: String,
}

// The static token must never show up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("github_repo", &self.github_repo)
            .field("branch", &self.branch)
            .field("project_id", &self.project_id)
            .field("token_secret", &self.token_secret)
            .field("has_static_token", &self.static_token.is_some())
            .field("graphql_url", &self.graphql_url)
            .field("commit_message_prefix", &self.commit_message_prefix)
            .field("request_timeout", &self.request_timeout)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - GITHUB_REPO (`owner/name`; invocations fail while unset)
    /// - GITHUB_BRANCH (optional, default: main)
    /// - PROJECT_ID (required unless GITHUB_TOKEN is set)
    /// - GITHUB_TOKEN_SECRET (optional, default: github_token)
    /// - GITHUB_TOKEN (optional, bypasses Secret Manager)
    /// - GITHUB_GRAPHQL_URL (optional, default: https://api.github.com/graphql)
    /// - COMMIT_MESSAGE_PREFIX (optional, default: "chore: scheduled empty commit")
    /// - PULSE_REQUEST_TIMEOUT_SECS (optional, seconds, default: 10)
    /// - PORT (optional, default: 8080)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary key lookup
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let request_timeout = get("PULSE_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(pulse_client::DEFAULT_TIMEOUT);

        let port = get("PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);

        Self {
            github_repo: get("GITHUB_REPO"),
            branch: get("GITHUB_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            project_id: get("PROJECT_ID"),
            token_secret: get("GITHUB_TOKEN_SECRET")
                .unwrap_or_else(|| DEFAULT_TOKEN_SECRET.to_string()),
            static_token: get("GITHUB_TOKEN"),
            graphql_url: get("GITHUB_GRAPHQL_URL")
                .unwrap_or_else(|| pulse_client::GRAPHQL_ENDPOINT.to_string()),
            commit_message_prefix: get("COMMIT_MESSAGE_PREFIX")
                .unwrap_or_else(|| DEFAULT_MESSAGE_PREFIX.to_string()),
            request_timeout,
            bind_addr: format!("0.0.0.0:{}", port),
        }
    }

    /// Validates settings that make the server unusable when wrong
    ///
    /// A missing repository is not checked here: it is reported on each
    /// invocation so the scheduler sees the failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.branch.is_empty() {
            anyhow::bail!("branch cannot be empty");
        }

        if !self.graphql_url.starts_with("http://") && !self.graphql_url.starts_with("https://") {
            anyhow::bail!("GITHUB_GRAPHQL_URL must start with http:// or https://");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
