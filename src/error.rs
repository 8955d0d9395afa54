//! Error type shared by the request dispatchers and the input binding.

use thiserror::Error;

/// Everything that can go wrong between a button click and a rendered result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The service answered with a non-2xx status.
    #[error("Server error: {0}")]
    Status(u16),

    /// The service answered `success: false`.
    #[error("{0}")]
    Service(String),

    /// The request never completed (connection refused, DNS, aborted fetch).
    #[error("network error: {0}")]
    Transport(String),

    /// The body was not the JSON shape we expect.
    #[error("invalid response: {0}")]
    Decode(String),

    /// A control held a value that does not parse.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}
