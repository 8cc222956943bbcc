//! Repository state queries

use pulse_core::domain::address::RepositoryAddress;
use pulse_core::domain::repository::RepositoryInfo;
use pulse_core::dto::graphql::{
    REPOSITORY_STATE_QUERY, RepositoryStateData, RepositoryStateVariables,
};

use crate::GitHubClient;
use crate::error::{ClientError, Result};

impl GitHubClient {
    /// Read the repository node ID and its default branch tip
    ///
    /// Both values must be non-empty. A repository without commits (or
    /// without a default branch) has no tip to anchor a commit to, so an
    /// empty head SHA is a failure even though the request succeeded.
    ///
    /// # Arguments
    /// * `token` - Bearer token for the GitHub API
    /// * `address` - The repository to inspect
    pub async fn get_repository_info(
        &self,
        token: &str,
        address: &RepositoryAddress,
    ) -> Result<RepositoryInfo> {
        tracing::debug!("Querying repository state for {}", address);

        let response = self
            .execute::<_, RepositoryStateData>(
                token,
                REPOSITORY_STATE_QUERY,
                RepositoryStateVariables::from(address),
            )
            .await?;

        if let Some(errors) = response.errors() {
            return Err(ClientError::RemoteApi(errors.to_vec()));
        }

        let data = response
            .data
            .ok_or(ClientError::IncompleteResponse("repository id"))?;

        let id = data.repository_id();
        if id.is_empty() {
            return Err(ClientError::IncompleteResponse("repository id"));
        }

        let head_sha = data.head_sha();
        if head_sha.is_empty() {
            return Err(ClientError::IncompleteResponse("head sha"));
        }

        Ok(RepositoryInfo {
            id: id.to_string(),
            head_sha: head_sha.to_string(),
        })
    }
}
