//! Error types for the GitHub GraphQL client

use pulse_core::dto::graphql::GraphQLError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the GitHub GraphQL API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (network error, timeout)
    #[error("failed to execute request: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// GitHub answered with a non-2xx status
    #[error("GitHub GraphQL API returned status {status}: {message}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Leading part of the response body
        message: String,
    },

    /// The response body was not a valid GraphQL envelope
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The envelope carried a non-empty `errors` list
    #[error("GraphQL errors: {}", join_errors(.0))]
    RemoteApi(Vec<GraphQLError>),

    /// The branch no longer points at the expected head
    #[error("branch no longer points to expected head {expected}: {}", join_errors(.errors))]
    ConcurrencyConflict {
        /// Head the commit was anchored to
        expected: String,
        errors: Vec<GraphQLError>,
    },

    /// A required field came back empty
    #[error("empty {0} in response")]
    IncompleteResponse(&'static str),
}

impl ClientError {
    /// Whether the failure happened before a well-formed envelope arrived
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::RequestFailed(_) | Self::HttpStatus { .. })
    }

    /// Whether the request was aborted by the client timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RequestFailed(err) if err.is_timeout())
    }

    /// HTTP status observed for the failed call, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::RequestFailed(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn join_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(message: &str) -> GraphQLError {
        GraphQLError {
            message: message.to_string(),
            error_type: None,
            path: None,
        }
    }

    #[test]
    fn test_remote_api_message_lists_every_error() {
        let err = ClientError::RemoteApi(vec![error("first"), error("second")]);
        assert_eq!(err.to_string(), "GraphQL errors: first; second");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_http_status_is_transport() {
        let err = ClientError::HttpStatus {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert!(err.is_transport());
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_incomplete_response_message() {
        let err = ClientError::IncompleteResponse("head sha");
        assert_eq!(err.to_string(), "empty head sha in response");
    }
}
