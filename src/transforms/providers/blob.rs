//! Transform for providers that serve the uploaded file from a plain URL
//! (Vercel Blob, Amazon S3, Backblaze, Cloudflare R2).

use serde_json::Value;
use vidasset_common::{Asset, AssetSource};

use crate::transforms::transform::{ProviderTransform, TransformProps};

/// Points `sources` at `providerMetadata.{provider}.url`.
#[derive(Debug, Clone)]
pub struct BlobTransform {
    provider: String,
}

impl BlobTransform {
    /// Create a transform for `provider` (canonical camelCase id).
    pub fn new(provider: &str) -> Self {
        Self {
            provider: provider.to_string(),
        }
    }
}

impl ProviderTransform for BlobTransform {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn transform(&self, mut asset: Asset, _props: Option<&TransformProps>) -> Asset {
        let Some(meta) = asset.provider_metadata.get(&self.provider) else {
            return asset;
        };
        let Some(url) = meta.get("url").and_then(Value::as_str) else {
            return asset;
        };

        let kind = meta
            .get("contentType")
            .and_then(Value::as_str)
            .map(str::to_string);
        let source = AssetSource::new(url, kind);
        asset.sources = Some(vec![source]);
        asset
    }
}
