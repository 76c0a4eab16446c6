//! Error types for download API calls.

use thiserror::Error;

/// Errors that can occur while fetching media links from the download API.
///
/// Every variant is terminal for the current attempt: the caller surfaces the
/// display string to the user and returns to idle. Nothing is retried.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, connection refused, TLS, timeout).
    #[error("network error contacting the download API: {source}")]
    Network {
        /// The submitted link the request was for.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success HTTP status.
    #[error("download API returned HTTP {status}")]
    HttpStatus {
        /// The submitted link the request was for.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body was not valid JSON.
    #[error("download API returned an unreadable response: {source}")]
    Decode {
        /// The submitted link the request was for.
        url: String,
        /// The underlying decode error.
        #[source]
        source: reqwest::Error,
    },

    /// A well-formed envelope signalled failure.
    ///
    /// Carries the server-supplied message when present, otherwise the
    /// generic per-platform failure message.
    #[error("{message}")]
    Api {
        /// User-facing failure message.
        message: String,
    },
}

impl ClientError {
    /// Creates a network error from a transport failure.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a decode error for a non-JSON body.
    pub fn decode(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Creates an API failure error with a user-facing message.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }
}

// No `From<reqwest::Error>`: the Network/Decode variants need the submitted
// link for context, which the source error does not carry. The helper
// constructors are the intended construction path.
