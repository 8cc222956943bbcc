//! GitHub repository
//!
//! Reads repository state and creates verified commits through the GraphQL
//! API.

use async_trait::async_trait;
use pulse_client::GitHubClient;
use pulse_core::domain::address::RepositoryAddress;
use pulse_core::domain::commit::{CommitRequest, CommitResult};
use pulse_core::domain::repository::RepositoryInfo;

/// Repository trait for GitHub operations
#[async_trait]
pub trait GitHubRepository: Send + Sync {
    /// Reads the repository ID and the tip of its default branch
    ///
    /// # Arguments
    /// * `token` - Bearer token for the GitHub API
    /// * `address` - The repository to read
    async fn get_repository_info(
        &self,
        token: &str,
        address: &RepositoryAddress,
    ) -> pulse_client::Result<RepositoryInfo>;

    /// Creates a server-signed commit anchored to `request.expected_head_sha`
    ///
    /// # Arguments
    /// * `token` - Bearer token for the GitHub API
    /// * `request` - The commit to create
    async fn create_verified_commit(
        &self,
        token: &str,
        request: &CommitRequest,
    ) -> pulse_client::Result<CommitResult>;
}

#[async_trait]
impl GitHubRepository for GitHubClient {
    async fn get_repository_info(
        &self,
        token: &str,
        address: &RepositoryAddress,
    ) -> pulse_client::Result<RepositoryInfo> {
        GitHubClient::get_repository_info(self, token, address).await
    }

    async fn create_verified_commit(
        &self,
        token: &str,
        request: &CommitRequest,
    ) -> pulse_client::Result<CommitResult> {
        GitHubClient::create_verified_commit(self, token, request).await
    }
}
