//! Registry mapping provider identifiers to their transforms.
//!
//! The [`TransformRegistry`] is assembled once at startup. Dispatch normalizes
//! the record's `provider` field to its canonical camelCase form and invokes
//! the single matching transform, if any.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;
use vidasset_common::{canonical_provider_id, Asset};

use super::providers::{BlobTransform, MuxTransform};
use super::transform::{ProviderTransform, TransformProps};

/// Provider identifiers whose records are served straight from a blob URL.
const BLOB_PROVIDERS: &[&str] = &["vercelBlob", "amazonS3", "backblaze", "cloudflareR2"];

/// A registry of [`ProviderTransform`] implementations keyed by canonical id.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use vidasset::transforms::TransformRegistry;
///
/// let mut registry = TransformRegistry::new();
/// registry.register(Arc::new(my_transform));
///
/// let asset = registry.apply(asset, None);
/// ```
pub struct TransformRegistry {
    transforms: HashMap<String, Arc<dyn ProviderTransform>>,
}

impl TransformRegistry {
    /// Create an empty registry with no transforms.
    pub fn new() -> Self {
        Self {
            transforms: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in transform.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MuxTransform));
        for provider in BLOB_PROVIDERS {
            registry.register(Arc::new(BlobTransform::new(provider)));
        }
        registry
    }

    /// Register a transform, replacing any previous one for the same provider.
    pub fn register(&mut self, transform: Arc<dyn ProviderTransform>) {
        let id = canonical_provider_id(transform.provider());
        self.transforms.insert(id, transform);
    }

    /// Look up the transform for `provider` (any casing or separator style).
    pub fn get(&self, provider: &str) -> Option<&dyn ProviderTransform> {
        self.transforms
            .get(&canonical_provider_id(provider))
            .map(|t| t.as_ref())
    }

    /// Canonical ids of all registered providers, sorted.
    pub fn providers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.transforms.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Run the transform matching `asset.provider`.
    ///
    /// Records without a provider, or whose provider has no registered
    /// transform, are returned unchanged.
    pub fn apply(&self, asset: Asset, props: Option<&TransformProps>) -> Asset {
        match self.get(&asset.provider) {
            Some(transform) => {
                trace!(provider = %asset.provider, "Applying provider transform");
                transform.transform(asset, props)
            }
            None => asset,
        }
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
