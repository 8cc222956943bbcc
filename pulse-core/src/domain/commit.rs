//! Commit domain types
//!
//! An empty commit is a commit request with no file changes. The headline
//! carries the UTC time of the request so every invocation is distinct.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::address::RepositoryAddress;

/// Branch targeted when none is configured
pub const DEFAULT_BRANCH: &str = "main";

/// Headline prefix used when none is configured
pub const DEFAULT_MESSAGE_PREFIX: &str = "chore: scheduled empty commit";

/// Request to create a commit on top of a known branch tip
///
/// `expected_head_sha` must be the tip observed earlier in the same
/// invocation. GitHub rejects the commit if the branch has moved since.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    pub repository_name_with_owner: String,
    pub branch_name: String,
    pub expected_head_sha: String,
    pub message_headline: String,
}

impl CommitRequest {
    /// Builds a request for a commit without file changes
    pub fn empty(
        address: &RepositoryAddress,
        branch_name: impl Into<String>,
        expected_head_sha: impl Into<String>,
        message_headline: impl Into<String>,
    ) -> Self {
        Self {
            repository_name_with_owner: address.name_with_owner(),
            branch_name: branch_name.into(),
            expected_head_sha: expected_head_sha.into(),
            message_headline: message_headline.into(),
        }
    }
}

/// Identifier of a commit created by GitHub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResult {
    pub oid: String,
}

impl std::fmt::Display for CommitResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.oid)
    }
}

/// Formats a commit headline as `"{prefix} ({RFC 3339 UTC timestamp})"`
pub fn headline_at(prefix: &str, at: DateTime<Utc>) -> String {
    format!(
        "{} ({})",
        prefix,
        at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

/// Formats a commit headline stamped with the current time
pub fn headline_now(prefix: &str) -> String {
    headline_at(prefix, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_headline_format() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            headline_at(DEFAULT_MESSAGE_PREFIX, at),
            "chore: scheduled empty commit (2025-01-02T03:04:05Z)"
        );
    }

    #[test]
    fn test_headline_differs_across_seconds() {
        let first = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let second = first + chrono::Duration::seconds(1);
        assert_ne!(headline_at("x", first), headline_at("x", second));
    }

    #[test]
    fn test_empty_request_uses_name_with_owner() {
        let address = RepositoryAddress::parse("octo/demo").unwrap();
        let request = CommitRequest::empty(&address, DEFAULT_BRANCH, "abc123", "headline");

        assert_eq!(request.repository_name_with_owner, "octo/demo");
        assert_eq!(request.branch_name, "main");
        assert_eq!(request.expected_head_sha, "abc123");
        assert_eq!(request.message_headline, "headline");
    }
}
