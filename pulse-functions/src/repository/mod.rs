//! Repository layer
//!
//! Repositories are stateless HTTP clients that abstract communication with
//! GitHub. They expose the two GraphQL operations the empty-commit workflow
//! needs, without any business logic.
//!
//! The trait keeps the workflow testable without a network.

mod github;

pub use github::GitHubRepository;
