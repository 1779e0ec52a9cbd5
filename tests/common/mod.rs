//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which starts a [`MockServer`] standing in for
//! the metadata API and builds an [`AssetService`] pointed at it, with a
//! temporary directory as the base for local references.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;
use vidasset::assets::{AssetService, HttpAssetStore};
use vidasset::config::Config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the metadata API is mounted under on the mock server.
pub const API_PATH: &str = "/api/video";

/// Test harness wrapping a mock metadata API and a service talking to it.
pub struct TestHarness {
    pub server: MockServer,
    pub service: AssetService,
    pub dir: TempDir,
}

impl TestHarness {
    /// Create a harness with the default configuration.
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    /// Create a harness with a custom configuration. `api_base_url` is
    /// always overwritten to point at the mock server.
    pub async fn with_config(mut config: Config) -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("failed to create temp dir");

        config.api_base_url = Some(format!("{}{API_PATH}", server.uri()));
        let store = HttpAssetStore::from_config(&config).expect("valid base url");
        let service = AssetService::new(Arc::new(config), Arc::new(store)).with_base_dir(dir.path());

        Self {
            server,
            service,
            dir,
        }
    }

    /// Mount a `GET` for `key` answering with `record`, expected `times` times.
    pub async fn mount_record(&self, key_path: &str, record: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(format!("{API_PATH}/{key_path}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(record))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Mount a `POST` to the API root answering with `status`.
    pub async fn mount_save(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(API_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Records carried by every `POST` the server received, in order.
    pub async fn saved_records(&self) -> Vec<(String, Value)> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.method.as_str() == "POST")
            .map(|request| {
                let body: Value = request.body_json().expect("save body is JSON");
                let key = body["path"].as_str().expect("path is a string").to_string();
                let asset = body["asset"].as_str().expect("asset is a JSON string");
                (key, serde_json::from_str(asset).expect("asset string is JSON"))
            })
            .collect()
    }
}

/// A minimal stored record with the given status.
pub fn record(status: &str) -> Value {
    json!({
        "status": status,
        "originalFilePath": "local/video.mp4",
        "provider": "mux",
        "providerMetadata": {},
        "createdAt": 1_700_000_000_000_i64,
        "updatedAt": 1_700_000_000_000_i64
    })
}
