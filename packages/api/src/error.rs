//! Errors surfaced by transports and the record service.

use thiserror::Error;

/// Failure of a GraphQL round trip.
///
/// Holds only owned strings so results can be cached in the list watch channel
/// and handed to every subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response carried a GraphQL `errors` array.
    #[error("{}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The payload did not have the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// A mutation returned `null` where a record was expected.
    #[error("empty result for {0}")]
    EmptyResult(&'static str),

    /// The server has no record with this id.
    #[error("no personne with id {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_messages_are_joined() {
        let err = ApiError::GraphQl(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(err.to_string(), "first; second");
    }

    #[test]
    fn test_http_display() {
        let err = ApiError::Http {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
    }
}
