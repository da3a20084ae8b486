//! Error types raised by the JSONBin storage implementation.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`JsonBinDaoError`] failures.
pub type JsonBinResult<T> = Result<T, JsonBinDaoError>;

/// Failures that can occur while talking to JSONBin.
#[derive(Debug, Error)]
pub enum JsonBinDaoError {
    /// Required environment variable is missing.
    #[error("missing JSONBin environment variable `{var}`")]
    MissingEnvVar {
        /// Name of the variable.
        var: &'static str,
    },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build JSONBin client")]
    ClientBuilder {
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent or the connection dropped.
    #[error("failed to send JSONBin request to `{url}`")]
    RequestSend {
        /// Bin endpoint that was called.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// JSONBin answered with a status outside the accepted set.
    #[error("unexpected JSONBin response status {status} for `{url}`")]
    RequestStatus {
        /// Bin endpoint that was called.
        url: String,
        /// Status returned by JSONBin.
        status: StatusCode,
    },
    /// Response payload could not be parsed into JSON.
    #[error("failed to decode JSONBin response for `{url}`")]
    DecodeResponse {
        /// Bin endpoint that was called.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
}
