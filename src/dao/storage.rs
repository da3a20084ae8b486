use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by playlist store backends regardless of the underlying transport.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store could not be reached or the response could not be decoded.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// What was being attempted.
        message: String,
        /// Underlying failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The store answered with a status outside the accepted set.
    #[error("storage rejected the request with status {status}")]
    Rejected {
        /// HTTP status returned by the store.
        status: u16,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct an error for a non-success status code.
    pub fn rejected(status: u16) -> Self {
        StorageError::Rejected { status }
    }
}
