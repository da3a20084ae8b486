mod config;
mod error;
mod models;
mod store;

pub use config::JsonBinConfig;
pub use error::JsonBinDaoError;
pub use store::JsonBinStore;

use crate::dao::storage::StorageError;

impl From<JsonBinDaoError> for StorageError {
    fn from(err: JsonBinDaoError) -> Self {
        match err {
            JsonBinDaoError::RequestStatus { status, .. } => StorageError::rejected(status.as_u16()),
            other => StorageError::unavailable(other.to_string(), other),
        }
    }
}
