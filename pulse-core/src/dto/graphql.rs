//! GraphQL DTOs
//!
//! Wire shapes for the two GitHub GraphQL operations Pulse performs: reading
//! repository state and creating a commit on a branch.

use serde::{Deserialize, Serialize};

use crate::domain::address::RepositoryAddress;
use crate::domain::commit::CommitRequest;

/// Query for the repository node ID and the default branch tip
pub const REPOSITORY_STATE_QUERY: &str = r#"
query($owner: String!, $repo: String!) {
  repository(owner: $owner, name: $repo) {
    id
    defaultBranchRef {
      target {
        ... on Commit {
          oid
        }
      }
    }
  }
}
"#;

/// Mutation creating a signed commit on a branch
pub const CREATE_COMMIT_MUTATION: &str = r#"
mutation($input: CreateCommitOnBranchInput!) {
  createCommitOnBranch(input: $input) {
    commit {
      oid
    }
  }
}
"#;

/// GitHub's error type for a stale `expectedHeadOid`
pub const STALE_DATA_ERROR_TYPE: &str = "STALE_DATA";

// =============================================================================
// Envelope
// =============================================================================

/// Outgoing GraphQL request body
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest<V> {
    pub query: &'static str,
    pub variables: V,
}

/// Incoming GraphQL response body
///
/// A non-empty `errors` list is a failure regardless of the HTTP status.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

impl<T> GraphQLResponse<T> {
    /// Returns the error list when it is present and non-empty
    pub fn errors(&self) -> Option<&[GraphQLError]> {
        match self.errors.as_deref() {
            Some(errors) if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }
}

/// A single GraphQL error entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,

    /// GitHub-specific classification such as `NOT_FOUND` or `STALE_DATA`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<serde_json::Value>>,
}

impl GraphQLError {
    /// Whether this error reports that the branch moved past the expected head
    pub fn is_stale_head(&self) -> bool {
        self.error_type.as_deref() == Some(STALE_DATA_ERROR_TYPE)
            || self.message.starts_with("Expected branch to point to")
    }
}

impl std::fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error_type {
            Some(kind) => write!(f, "{} ({})", self.message, kind),
            None => write!(f, "{}", self.message),
        }
    }
}

// =============================================================================
// Repository state
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RepositoryStateVariables {
    pub owner: String,
    pub repo: String,
}

impl From<&RepositoryAddress> for RepositoryStateVariables {
    fn from(address: &RepositoryAddress) -> Self {
        Self {
            owner: address.owner().to_string(),
            repo: address.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryStateData {
    pub repository: Option<RepositoryNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    #[serde(default)]
    pub id: String,
    pub default_branch_ref: Option<BranchRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchRef {
    pub target: Option<CommitNode>,
}

/// A commit object; `oid` is absent when the target is not a commit
#[derive(Debug, Clone, Deserialize)]
pub struct CommitNode {
    #[serde(default)]
    pub oid: Option<String>,
}

impl RepositoryStateData {
    /// The repository ID, empty when the repository is missing
    pub fn repository_id(&self) -> &str {
        self.repository
            .as_ref()
            .map(|repo| repo.id.as_str())
            .unwrap_or_default()
    }

    /// The default branch tip, empty when there is no branch or no commit
    pub fn head_sha(&self) -> &str {
        self.repository
            .as_ref()
            .and_then(|repo| repo.default_branch_ref.as_ref())
            .and_then(|branch| branch.target.as_ref())
            .and_then(|target| target.oid.as_deref())
            .unwrap_or_default()
    }
}

// =============================================================================
// Commit creation
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateCommitVariables {
    pub input: CreateCommitOnBranchInput,
}

/// GitHub's `CreateCommitOnBranchInput`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommitOnBranchInput {
    pub branch: CommittableBranch,
    pub expected_head_oid: String,
    pub message: CommitMessage,
    pub file_changes: FileChanges,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittableBranch {
    pub repository_name_with_owner: String,
    pub branch_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitMessage {
    pub headline: String,
}

/// Always empty: no additions and no deletions
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileChanges {}

impl From<&CommitRequest> for CreateCommitVariables {
    fn from(request: &CommitRequest) -> Self {
        Self {
            input: CreateCommitOnBranchInput {
                branch: CommittableBranch {
                    repository_name_with_owner: request.repository_name_with_owner.clone(),
                    branch_name: request.branch_name.clone(),
                },
                expected_head_oid: request.expected_head_sha.clone(),
                message: CommitMessage {
                    headline: request.message_headline.clone(),
                },
                file_changes: FileChanges::default(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommitData {
    pub create_commit_on_branch: Option<CreateCommitPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommitPayload {
    pub commit: Option<CommitNode>,
}

impl CreateCommitData {
    /// The created commit's OID, empty when absent
    pub fn commit_oid(&self) -> &str {
        self.create_commit_on_branch
            .as_ref()
            .and_then(|payload| payload.commit.as_ref())
            .and_then(|commit| commit.oid.as_deref())
            .unwrap_or_default()
    }
}
