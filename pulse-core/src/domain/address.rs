//! Repository addressing
//!
//! A repository is addressed as `owner/name`. The string comes straight from
//! configuration, so it is validated before anything talks to GitHub.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between the owner and repository name segments
pub const SEPARATOR: char = '/';

/// Errors produced while parsing an `owner/name` string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The string did not split into exactly two segments
    #[error("GITHUB_REPO must be in format 'owner/repo', got: {0}")]
    InvalidFormat(String),

    /// One of the two segments was empty
    #[error("GITHUB_REPO owner and repo cannot be empty, got: {0}")]
    EmptySegment(String),
}

impl AddressError {
    /// The raw value that failed to parse
    pub fn raw(&self) -> &str {
        match self {
            AddressError::InvalidFormat(raw) | AddressError::EmptySegment(raw) => raw,
        }
    }
}

/// A validated `owner/name` pair
///
/// Serialized as the `owner/name` string. Deserializing goes through
/// [`RepositoryAddress::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryAddress {
    owner: String,
    name: String,
}

impl RepositoryAddress {
    /// Parses and validates an `owner/name` string
    ///
    /// Exactly one separator is allowed and neither side may be empty.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let parts: Vec<&str> = raw.split(SEPARATOR).collect();
        let [owner, name] = parts.as_slice() else {
            return Err(AddressError::InvalidFormat(raw.to_string()));
        };

        if owner.is_empty() || name.is_empty() {
            return Err(AddressError::EmptySegment(raw.to_string()));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fully-qualified `owner/name` form GitHub mutations expect
    pub fn name_with_owner(&self) -> String {
        format!("{}{}{}", self.owner, SEPARATOR, self.name)
    }
}

impl fmt::Display for RepositoryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.owner, SEPARATOR, self.name)
    }
}

impl FromStr for RepositoryAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for RepositoryAddress {
    type Error = AddressError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for RepositoryAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RepositoryAddress> for String {
    fn from(address: RepositoryAddress) -> Self {
        address.name_with_owner()
    }
}
