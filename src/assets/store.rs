//! Remote metadata store clients.
//!
//! [`AssetStore`] is the only seam through which asset records leave the
//! process. [`HttpAssetStore`] talks to the metadata API; [`MemoryAssetStore`]
//! keeps records in memory for offline use and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::debug;
use vidasset_common::{Asset, Error, Result};

use crate::config::Config;

/// Read and write access to asset records by storage key.
///
/// Implementations perform no retries: a failed request fails the call.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Fetch the record stored under `key`.
    ///
    /// Returns [`Error::NotFound`] when the store has no such record.
    async fn load(&self, key: &str) -> Result<Asset>;

    /// Persist `asset` under `key`, replacing any previous record.
    async fn save(&self, key: &str, asset: &Asset) -> Result<()>;
}

/// Body of a write request.
#[derive(Serialize)]
struct SaveRequest<'a> {
    path: &'a str,
    /// The record, serialized to a JSON string.
    asset: String,
}

/// [`AssetStore`] backed by the metadata HTTP API.
///
/// Reads issue `GET {base}/{key}`, writes issue `POST {base}` with a
/// `{ path, asset }` JSON body.
pub struct HttpAssetStore {
    client: Client,
    base_url: Url,
}

impl HttpAssetStore {
    /// Create a store for the API rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a store that sends requests through an existing client.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            Error::configuration(format!("invalid api_base_url {base_url}: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::configuration(format!(
                "api_base_url cannot be used as a base: {base_url}"
            )));
        }
        Ok(Self { client, base_url })
    }

    /// Create a store from the `api_base_url` of `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.require_api_base_url()?)
    }

    /// The endpoint writes are posted to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{key}`, with every key segment percent-encoded.
    fn record_url(&self, key: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(key.split('/'));
        }
        url
    }
}

#[async_trait]
impl AssetStore for HttpAssetStore {
    async fn load(&self, key: &str) -> Result<Asset> {
        let url = self.record_url(key);
        debug!(%url, key, "Loading asset");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::http(format!("GET {url} failed: {e}")))?;

        if !response.status().is_success() {
            debug!(key, status = response.status().as_u16(), "Asset load rejected");
            return Err(Error::not_found(key));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::http(format!("failed to read body of {url}: {e}")))?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn save(&self, key: &str, asset: &Asset) -> Result<()> {
        let request = SaveRequest {
            path: key,
            asset: serde_json::to_string(asset)?,
        };
        debug!(url = %self.base_url, key, status = %asset.status, "Saving asset");

        let response = self
            .client
            .post(self.base_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::http(format!("POST {} failed: {e}", self.base_url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::store_write(key, status.as_u16()));
        }
        Ok(())
    }
}

/// [`AssetStore`] holding records in process memory.
#[derive(Default)]
pub struct MemoryAssetStore {
    records: DashMap<String, Asset>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn load(&self, key: &str) -> Result<Asset> {
        self.records
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::not_found(key))
    }

    async fn save(&self, key: &str, asset: &Asset) -> Result<()> {
        self.records.insert(key.to_string(), asset.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidasset_common::AssetStatus;

    #[test]
    fn record_url_encodes_segments() {
        let store = HttpAssetStore::new("http://localhost:3000/api/video").unwrap();
        let url = store.record_url("videos/example.com/a b.mp4.json");
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/video/videos/example.com/a%20b.mp4.json"
        );
    }

    #[test]
    fn record_url_handles_trailing_slash_base() {
        let store = HttpAssetStore::new("http://localhost:3000/api/video/").unwrap();
        let url = store.record_url("local/video.mp4.json");
        assert_eq!(url.as_str(), "http://localhost:3000/api/video/local/video.mp4.json");
    }

    #[test]
    fn invalid_base_url_is_configuration_error() {
        assert!(matches!(
            HttpAssetStore::new("not a url"),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            HttpAssetStore::new("mailto:someone@example.com"),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn from_config_requires_base_url() {
        assert!(matches!(
            HttpAssetStore::from_config(&Config::default()),
            Err(Error::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryAssetStore::new();
        assert!(store.load("a.json").await.unwrap_err().is_not_found());

        let asset = Asset {
            status: AssetStatus::Processing,
            original_file_path: "a.mp4".into(),
            ..Default::default()
        };
        store.save("a.json", &asset).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load("a.json").await.unwrap(), asset);
    }
}
