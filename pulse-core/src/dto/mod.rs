//! Data Transfer Objects for the GitHub GraphQL API
//!
//! Each operation has its own typed variables struct so the request shape is
//! checked at compile time instead of being assembled from loose JSON maps.

pub mod graphql;
