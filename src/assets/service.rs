//! Asset lifecycle operations.
//!
//! [`AssetService`] composes key resolution, the ready-asset cache, the
//! remote store and the provider transforms into the public `get`, `create`
//! and `update` operations.
//!
//! Updates are read-modify-write with no version check: two concurrent
//! updates of the same key both succeed and the later `save` wins. An update
//! reads through [`AssetService::get`], so a ready asset that is already
//! cached is merged from its cached form.

use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{debug, info};
use vidasset_common::paths::is_remote;
use vidasset_common::{Asset, AssetStatus, Error, Result};

use super::cache::AssetCache;
use super::merge::deep_merge;
use super::resolver;
use super::store::{AssetStore, HttpAssetStore};
use crate::config::Config;
use crate::transforms::{TransformProps, TransformRegistry};

/// High-level asset service coordinating the cache, store and transforms.
pub struct AssetService {
    config: Arc<Config>,
    store: Arc<dyn AssetStore>,
    cache: Arc<AssetCache>,
    transforms: Arc<TransformRegistry>,
    base_dir: PathBuf,
    last_timestamp: AtomicI64,
}

impl AssetService {
    /// Create a new `AssetService`.
    ///
    /// The service starts with an empty cache, the built-in transforms, and
    /// the process working directory as the base for local references.
    ///
    /// # Arguments
    ///
    /// * `config` - Provider, folder and path strategy settings
    /// * `store` - Backend records are loaded from and saved to
    pub fn new(config: Arc<Config>, store: Arc<dyn AssetStore>) -> Self {
        Self {
            config,
            store,
            cache: Arc::new(AssetCache::new()),
            transforms: Arc::new(TransformRegistry::builtin()),
            base_dir: std::env::current_dir().unwrap_or_default(),
            last_timestamp: AtomicI64::new(0),
        }
    }

    /// Create a service talking to the HTTP store at `config.api_base_url`.
    pub fn from_config(config: Config) -> Result<Self> {
        let store = HttpAssetStore::from_config(&config)?;
        Ok(Self::new(Arc::new(config), Arc::new(store)))
    }

    /// Share an existing cache instead of the service's own.
    pub fn with_cache(mut self, cache: Arc<AssetCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Replace the transform registry.
    pub fn with_transforms(mut self, transforms: Arc<TransformRegistry>) -> Self {
        self.transforms = transforms;
        self
    }

    /// Directory local references are resolved and reported against.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    /// The storage key of the metadata record for `file_ref`.
    pub fn asset_key(&self, file_ref: &str) -> Result<String> {
        resolver::asset_key(&self.config, file_ref)
    }

    /// Fetch the asset for `file_ref`.
    ///
    /// Ready assets are answered from the cache once seen; anything else is
    /// loaded from the store on every call.
    pub async fn get(&self, file_ref: &str) -> Result<Asset> {
        let key = self.asset_key(file_ref)?;

        if let Some(asset) = self.cache.lookup(&key) {
            debug!(key = %key, "Asset cache hit");
            return Ok(asset);
        }

        debug!(key = %key, "Asset cache miss");
        let asset = self.store.load(&key).await?;
        if self.cache.insert(&key, &asset) {
            debug!(key = %key, "Cached ready asset");
        }
        Ok(asset)
    }

    /// Create and persist a new asset for `file_ref`.
    ///
    /// `overrides`, when given, must be a JSON object. Its fields are applied
    /// over the `pending` default status and may attach extra fields, but
    /// `originalFilePath`, `provider`, `providerMetadata` and the timestamps
    /// are always set by the service. For local files the byte size is
    /// recorded when the file can be stat'ed.
    pub async fn create(&self, file_ref: &str, overrides: Option<Value>) -> Result<Asset> {
        let key = self.asset_key(file_ref)?;
        let now = self.next_timestamp(0)?;

        let mut fields = Map::new();
        fields.insert("status".into(), json!(AssetStatus::Pending));
        match overrides {
            Some(Value::Object(overrides)) => fields.extend(overrides),
            Some(Value::Null) | None => {}
            Some(other) => {
                return Err(Error::invalid_input(format!(
                    "asset overrides must be an object, got {other}"
                )))
            }
        }
        fields.insert(
            "originalFilePath".into(),
            json!(resolver::original_file_path(file_ref, &self.base_dir)),
        );
        fields.insert("provider".into(), json!(self.config.provider));
        fields.insert("providerMetadata".into(), json!({}));
        fields.insert("createdAt".into(), json!(now));
        fields.insert("updatedAt".into(), json!(now));

        let mut asset: Asset = serde_json::from_value(Value::Object(fields))
            .map_err(|e| Error::invalid_input(format!("invalid asset fields: {e}")))?;

        if !is_remote(file_ref) {
            match tokio::fs::metadata(self.base_dir.join(file_ref)).await {
                Ok(meta) => asset.size = Some(meta.len()),
                Err(e) => debug!(file_ref, error = %e, "Could not stat source file, omitting size"),
            }
        }

        self.store.save(&key, &asset).await?;
        info!(key = %key, status = %asset.status, provider = %asset.provider, "Created asset");
        Ok(asset)
    }

    /// Deep-merge `patch` into the asset for `file_ref` and persist it.
    ///
    /// `patch` must be a JSON object. Nested objects merge key by key; any
    /// other value replaces the current one. `updatedAt` is always refreshed
    /// and `createdAt` always kept. The merged record then passes through the
    /// transform registered for its provider before it is saved.
    pub async fn update(&self, file_ref: &str, patch: Value) -> Result<Asset> {
        self.update_with_props(file_ref, patch, None).await
    }

    /// Like [`update`](Self::update), handing `props` to the provider
    /// transform (e.g. the poster thumbnail time).
    pub async fn update_with_props(
        &self,
        file_ref: &str,
        patch: Value,
        props: Option<&TransformProps>,
    ) -> Result<Asset> {
        if !patch.is_object() {
            return Err(Error::invalid_input(format!(
                "asset patch must be an object, got {patch}"
            )));
        }

        let key = self.asset_key(file_ref)?;
        let current = self.get(file_ref).await?;
        let created_at = current.created_at;
        let updated_at = self.next_timestamp(current.updated_at)?;

        let mut merged = serde_json::to_value(&current)?;
        deep_merge(&mut merged, patch);

        let mut asset: Asset = serde_json::from_value(merged)
            .map_err(|e| Error::invalid_input(format!("invalid asset patch: {e}")))?;
        asset.created_at = created_at;
        asset.updated_at = updated_at;

        let asset = self.transforms.apply(asset, props);

        self.store.save(&key, &asset).await?;
        info!(key = %key, status = %asset.status, "Updated asset");
        Ok(asset)
    }

    /// Current time in milliseconds, strictly greater than `floor` and than
    /// every timestamp this service handed out before.
    ///
    /// Fails with `InvalidInput` when no such value fits in an `i64`.
    fn next_timestamp(&self, floor: i64) -> Result<i64> {
        let now = chrono::Utc::now().timestamp_millis();
        let mut issued = now;
        self.last_timestamp
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                issued = now.max(last.checked_add(1)?).max(floor.checked_add(1)?);
                Some(issued)
            })
            .map_err(|last| {
                Error::invalid_input(format!(
                    "no timestamp left after {}",
                    last.max(floor)
                ))
            })?;
        Ok(issued)
    }
}
