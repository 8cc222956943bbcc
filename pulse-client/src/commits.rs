//! Commit creation

use pulse_core::domain::commit::{CommitRequest, CommitResult};
use pulse_core::dto::graphql::{CREATE_COMMIT_MUTATION, CreateCommitData, CreateCommitVariables};

use crate::GitHubClient;
use crate::error::{ClientError, Result};

impl GitHubClient {
    /// Create a commit through `createCommitOnBranch`
    ///
    /// GitHub signs the commit with the token owner's identity and only
    /// applies it if the branch still points at `expected_head_sha`. A stale
    /// head is reported as [`ClientError::ConcurrencyConflict`]; it is never
    /// retried or rebased.
    ///
    /// # Arguments
    /// * `token` - Bearer token for the GitHub API
    /// * `request` - Target branch, expected head and headline
    ///
    /// # Returns
    /// The OID of the new commit
    pub async fn create_verified_commit(
        &self,
        token: &str,
        request: &CommitRequest,
    ) -> Result<CommitResult> {
        tracing::debug!(
            "Creating commit on {}:{} on top of {}",
            request.repository_name_with_owner,
            request.branch_name,
            request.expected_head_sha
        );

        let response = self
            .execute::<_, CreateCommitData>(
                token,
                CREATE_COMMIT_MUTATION,
                CreateCommitVariables::from(request),
            )
            .await?;

        if let Some(errors) = response.errors() {
            if errors.iter().any(|e| e.is_stale_head()) {
                return Err(ClientError::ConcurrencyConflict {
                    expected: request.expected_head_sha.clone(),
                    errors: errors.to_vec(),
                });
            }
            return Err(ClientError::RemoteApi(errors.to_vec()));
        }

        let oid = response
            .data
            .as_ref()
            .map(CreateCommitData::commit_oid)
            .unwrap_or_default();

        if oid.is_empty() {
            return Err(ClientError::IncompleteResponse("commit oid"));
        }

        Ok(CommitResult {
            oid: oid.to_string(),
        })
    }
}
