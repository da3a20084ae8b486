use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::dao::{playlist_store::PlaylistStore, storage::StorageResult};

use super::{
    config::JsonBinConfig,
    error::{JsonBinDaoError, JsonBinResult},
    models::BinEnvelope,
};

const MASTER_KEY_HEADER: &str = "X-Master-Key";
const ACCEPTED_WRITE_STATUSES: [StatusCode; 3] =
    [StatusCode::OK, StatusCode::CREATED, StatusCode::NO_CONTENT];

/// Playlist store backed by a single JSONBin document.
///
/// Every call is a single attempt: failures are reported to the caller and never retried.
#[derive(Clone)]
pub struct JsonBinStore {
    client: Client,
    endpoint: Arc<str>,
    api_key: Arc<str>,
}

impl JsonBinStore {
    /// Build the HTTP client for the configured bin. No request is issued.
    pub fn new(config: JsonBinConfig) -> JsonBinResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| JsonBinDaoError::ClientBuilder { source })?;

        Ok(Self {
            client,
            endpoint: Arc::from(config.endpoint()),
            api_key: Arc::from(config.api_key),
        })
    }

    fn request(&self, method: Method) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.endpoint.as_ref())
            .header(MASTER_KEY_HEADER, self.api_key.as_ref())
    }

    async fn get_record(&self) -> JsonBinResult<Value> {
        let url = self.endpoint.to_string();
        let response = self
            .request(Method::GET)
            .send()
            .await
            .map_err(|source| JsonBinDaoError::RequestSend {
                url: url.clone(),
                source,
            })?;

        match response.status() {
            StatusCode::OK => response
                .json::<BinEnvelope>()
                .await
                .map(|envelope| envelope.record)
                .map_err(|source| JsonBinDaoError::DecodeResponse { url, source }),
            other => Err(JsonBinDaoError::RequestStatus { url, status: other }),
        }
    }

    async fn put_record(&self, record: &Value) -> JsonBinResult<()> {
        let url = self.endpoint.to_string();
        let response = self
            .request(Method::PUT)
            .json(record)
            .send()
            .await
            .map_err(|source| JsonBinDaoError::RequestSend {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if ACCEPTED_WRITE_STATUSES.contains(&status) {
            debug!(%status, "playlist record replaced");
            Ok(())
        } else {
            Err(JsonBinDaoError::RequestStatus { url, status })
        }
    }
}

impl PlaylistStore for JsonBinStore {
    fn fetch_record(&self) -> BoxFuture<'static, StorageResult<Value>> {
        let store = self.clone();
        Box::pin(async move { store.get_record().await.map_err(Into::into) })
    }

    fn replace_record(&self, record: Value) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.put_record(&record).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let url = store.endpoint.to_string();
            let response = store
                .request(Method::GET)
                .send()
                .await
                .map_err(|source| JsonBinDaoError::RequestSend {
                    url: url.clone(),
                    source,
                })?;

            if response.status().is_success() {
                Ok(())
            } else {
                Err(JsonBinDaoError::RequestStatus {
                    url,
                    status: response.status(),
                }
                .into())
            }
        })
    }
}
