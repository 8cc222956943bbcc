//! Empty commit service
//!
//! Creates a server-signed commit with no file changes on the configured
//! branch. One invocation walks these stages in order and stops at the first
//! failure:
//!
//! `Idle → ConfigLoaded → Validated → Authenticated → RepoStateRead →
//! CommitCreated → Responded`
//!
//! Nothing is written to GitHub before the final mutation, and that mutation
//! is atomic, so a failed invocation never leaves partial state behind.

use std::fmt;
use std::sync::Arc;

use pulse_client::ClientError;
use pulse_core::domain::address::{AddressError, RepositoryAddress};
use pulse_core::domain::commit::{CommitRequest, CommitResult, headline_now};
use thiserror::Error;
use tracing::{Instrument, Span};

use crate::config::Config;
use crate::credentials::{CredentialError, CredentialProvider};
use crate::repository::GitHubRepository;

/// Stages of a single invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStage {
    Idle,
    ConfigLoaded,
    Validated,
    Authenticated,
    RepoStateRead,
    CommitCreated,
    Responded,
}

impl fmt::Display for InvocationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvocationStage::Idle => "Idle",
            InvocationStage::ConfigLoaded => "ConfigLoaded",
            InvocationStage::Validated => "Validated",
            InvocationStage::Authenticated => "Authenticated",
            InvocationStage::RepoStateRead => "RepoStateRead",
            InvocationStage::CommitCreated => "CommitCreated",
            InvocationStage::Responded => "Responded",
        };
        write!(f, "{}", name)
    }
}

/// Failure classification reported in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidConfiguration,
    CredentialFailure,
    TransportFailure,
    RemoteApiError,
    IncompleteResponse,
    ConcurrencyConflict,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidConfiguration => "InvalidConfiguration",
            ErrorKind::CredentialFailure => "CredentialFailure",
            ErrorKind::TransportFailure => "TransportFailure",
            ErrorKind::RemoteApiError => "RemoteAPIError",
            ErrorKind::IncompleteResponse => "IncompleteResponse",
            ErrorKind::ConcurrencyConflict => "ConcurrencyConflict",
        };
        write!(f, "{}", name)
    }
}

/// Service error type
#[derive(Debug, Error)]
pub enum EmptyCommitError {
    #[error("GITHUB_REPO not set")]
    MissingRepository,

    #[error(transparent)]
    InvalidAddress(#[from] AddressError),

    #[error("failed to get GitHub token: {0}")]
    Credentials(#[from] CredentialError),

    #[error("failed to get repository info: {0}")]
    RepositoryState(#[source] ClientError),

    #[error("failed to create verified commit: {0}")]
    CommitCreation(#[source] ClientError),
}

impl EmptyCommitError {
    /// The last stage reached before the failure
    pub fn stage(&self) -> InvocationStage {
        match self {
            EmptyCommitError::MissingRepository => InvocationStage::Idle,
            EmptyCommitError::InvalidAddress(_) => InvocationStage::ConfigLoaded,
            EmptyCommitError::Credentials(_) => InvocationStage::Validated,
            EmptyCommitError::RepositoryState(_) => InvocationStage::Authenticated,
            EmptyCommitError::CommitCreation(_) => InvocationStage::RepoStateRead,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EmptyCommitError::MissingRepository | EmptyCommitError::InvalidAddress(_) => {
                ErrorKind::InvalidConfiguration
            }
            EmptyCommitError::Credentials(CredentialError::MissingConfiguration(_)) => {
                ErrorKind::InvalidConfiguration
            }
            EmptyCommitError::Credentials(_) => ErrorKind::CredentialFailure,
            EmptyCommitError::RepositoryState(err) | EmptyCommitError::CommitCreation(err) => {
                match err {
                    ClientError::RequestFailed(_)
                    | ClientError::HttpStatus { .. }
                    | ClientError::Decode(_) => ErrorKind::TransportFailure,
                    ClientError::RemoteApi(_) => ErrorKind::RemoteApiError,
                    ClientError::IncompleteResponse(_) => ErrorKind::IncompleteResponse,
                    ClientError::ConcurrencyConflict { .. } => ErrorKind::ConcurrencyConflict,
                }
            }
        }
    }
}

/// Creates verified empty commits on the configured repository
pub struct EmptyCommitService {
    github_repo: Option<String>,
    branch: String,
    message_prefix: String,
    credentials: Arc<dyn CredentialProvider>,
    github: Arc<dyn GitHubRepository>,
    span: Span,
}

impl EmptyCommitService {
    /// Creates the service
    ///
    /// # Arguments
    /// * `config` - Repository, branch and headline prefix
    /// * `credentials` - Source of the GitHub token
    /// * `github` - GitHub API access
    /// * `span` - Parent of the per-invocation spans
    pub fn new(
        config: &Config,
        credentials: Arc<dyn CredentialProvider>,
        github: Arc<dyn GitHubRepository>,
        span: Span,
    ) -> Self {
        Self {
            github_repo: config.github_repo.clone(),
            branch: config.branch.clone(),
            message_prefix: config.commit_message_prefix.clone(),
            credentials,
            github,
            span,
        }
    }

    /// Runs one invocation
    ///
    /// Each call opens its own `invocation` span under the function span.
    /// Every remote call is attempted at most once. Failures are logged with
    /// the repository and the stage that was reached, then returned.
    pub async fn run(&self) -> Result<CommitResult, EmptyCommitError> {
        let span = tracing::info_span!(
            parent: &self.span,
            "invocation",
            repo = self.github_repo.as_deref().unwrap_or_default()
        );

        async {
            let result = self.create_empty_commit().await;
            if let Err(err) = &result {
                tracing::error!(
                    repo = self.github_repo.as_deref().unwrap_or_default(),
                    stage = %err.stage(),
                    kind = %err.kind(),
                    "Empty commit failed: {}",
                    err
                );
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn create_empty_commit(&self) -> Result<CommitResult, EmptyCommitError> {
        let raw = self
            .github_repo
            .as_deref()
            .ok_or(EmptyCommitError::MissingRepository)?;
        enter(InvocationStage::ConfigLoaded);

        let address = RepositoryAddress::parse(raw)?;
        enter(InvocationStage::Validated);
        tracing::info!("Starting empty commit for repo: {}", address);

        let token = self.credentials.get_token().await?;
        enter(InvocationStage::Authenticated);

        tracing::info!("Getting repository ID and HEAD SHA for repo: {}", address);
        let info = self
            .github
            .get_repository_info(&token, &address)
            .await
            .map_err(EmptyCommitError::RepositoryState)?;
        enter(InvocationStage::RepoStateRead);
        tracing::info!(
            "Repository ID: {}, Current HEAD SHA: {}",
            info.id,
            info.head_sha
        );

        tracing::info!("Creating verified empty commit on {}", self.branch);
        let request = CommitRequest::empty(
            &address,
            self.branch.as_str(),
            info.head_sha,
            headline_now(&self.message_prefix),
        );
        let commit = self
            .github
            .create_verified_commit(&token, &request)
            .await
            .map_err(EmptyCommitError::CommitCreation)?;
        enter(InvocationStage::CommitCreated);
        tracing::info!("Created verified commit SHA: {}", commit.oid);

        Ok(commit)
    }
}

fn enter(stage: InvocationStage) {
    tracing::debug!(%stage, "Entered stage");
}
