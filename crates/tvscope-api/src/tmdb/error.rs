//! Catalog fetch error type.

use reqwest::StatusCode;
use thiserror::Error;

/// Error returned by every catalog operation.
///
/// Transport failures, non-success provider statuses, and undecodable
/// payloads all fold into this one type. Each variant carries the logical
/// operation name (e.g. `"search_tv"`) for diagnostics; the client never
/// recovers an error itself, callers decide how to degrade.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or no response arrived.
    #[error("{operation}: transport failure: {source}")]
    Transport {
        /// Logical operation name.
        operation: &'static str,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status.
    #[error("{operation}: provider returned {status}: {message}")]
    Provider {
        /// Logical operation name.
        operation: &'static str,
        /// HTTP status code.
        status: StatusCode,
        /// Provider error message, or the raw body when unparseable.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("{operation}: failed to decode response: {source}")]
    Decode {
        /// Logical operation name.
        operation: &'static str,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Returns the logical operation name that produced this error.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Transport { operation, .. }
            | Self::Provider { operation, .. }
            | Self::Decode { operation, .. } => operation,
        }
    }
}

/// Error returned when a [`TmdbClient`](super::TmdbClient) cannot be built.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// No API key was provided.
    #[error("api_key is required")]
    MissingApiKey,

    /// No User-Agent was provided.
    #[error("user_agent is required")]
    MissingUserAgent,

    /// The base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
