//! Repository state domain model

/// Repository identity and default branch tip, as observed at read time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    /// GitHub's opaque node ID for the repository
    pub id: String,

    /// Commit OID at the tip of the default branch
    pub head_sha: String,
}
