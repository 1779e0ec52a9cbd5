//! Core type definitions for asset records.
//!
//! An [`Asset`] is the JSON metadata record stored next to (or on behalf of) a
//! media file while an external provider uploads and transcodes it. The record
//! is open: fields outside the typed core are kept in [`Asset::extra`] and
//! survive every read, merge, and write untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// Lifecycle state of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    /// The source file has been located but nothing has been sent yet.
    Sourced,
    /// The asset is waiting to be uploaded.
    #[default]
    Pending,
    /// Bytes are being transferred to the provider.
    Uploading,
    /// The provider is transcoding the upload.
    Processing,
    /// Processing finished; playback data is available.
    Ready,
    /// Processing failed.
    Error,
}

impl AssetStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [AssetStatus; 6] = [
        Self::Sourced,
        Self::Pending,
        Self::Uploading,
        Self::Processing,
        Self::Ready,
        Self::Error,
    ];

    /// Returns `true` for states the provider will not move out of on its own.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Error)
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sourced => write!(f, "sourced"),
            Self::Pending => write!(f, "pending"),
            Self::Uploading => write!(f, "uploading"),
            Self::Processing => write!(f, "processing"),
            Self::Ready => write!(f, "ready"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl FromStr for AssetStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid_input(format!("unknown asset status: {s}")))
    }
}

/// A playable rendition of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssetSource {
    /// URL of the rendition.
    pub src: String,
    /// MIME type, when known.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Provider-specific attributes such as `width` or `label`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AssetSource {
    /// A source with a URL and MIME type and nothing else.
    pub fn new(src: impl Into<String>, kind: Option<String>) -> Self {
        Self {
            src: src.into(),
            kind,
            extra: Map::new(),
        }
    }
}

/// Metadata record describing a media file and its processing state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub status: AssetStatus,

    /// Relative path for local files, the verbatim URL for remote ones.
    pub original_file_path: String,

    /// Identifier of the provider that owns this asset (e.g. `"mux"`).
    #[serde(default)]
    pub provider: String,

    /// Provider-private fields, keyed by canonical provider identifier.
    #[serde(default)]
    pub provider_metadata: BTreeMap<String, Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<AssetSource>>,

    #[serde(
        rename = "blurDataURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub blur_data_url: Option<String>,

    /// Size of the local source file in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,

    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: i64,

    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub updated_at: i64,

    /// Legacy provider identifiers from before `providerMetadata` existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_ids: Option<Map<String, Value>>,

    /// Any field not covered above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Asset {
    /// Returns `true` when the asset has finished processing.
    pub fn is_ready(&self) -> bool {
        self.status == AssetStatus::Ready
    }

    /// Provider-private fields for `provider`, looked up by canonical id.
    pub fn provider_metadata_for(&self, provider: &str) -> Option<&Map<String, Value>> {
        self.provider_metadata.get(&canonical_provider_id(provider))
    }

    /// Legacy external id lookup (e.g. `playbackId`).
    pub fn external_id(&self, name: &str) -> Option<&str> {
        self.external_ids
            .as_ref()
            .and_then(|ids| ids.get(name))
            .and_then(Value::as_str)
    }
}

/// Convert a provider identifier to its canonical camelCase form.
///
/// Words are split on `-`, `_`, `.` and whitespace. Words written entirely in
/// upper case are lowered first, so `MUX` and `Mux` both become `mux`.
///
/// # Examples
///
/// ```
/// use vidasset_common::canonical_provider_id;
///
/// assert_eq!(canonical_provider_id("mux"), "mux");
/// assert_eq!(canonical_provider_id("Mux"), "mux");
/// assert_eq!(canonical_provider_id("vercel-blob"), "vercelBlob");
/// assert_eq!(canonical_provider_id("amazon-s3"), "amazonS3");
/// assert_eq!(canonical_provider_id("amazonS3"), "amazonS3");
/// ```
pub fn canonical_provider_id(provider: &str) -> String {
    let words = provider
        .split(|c: char| c == '-' || c == '_' || c == '.' || c.is_whitespace())
        .filter(|word| !word.is_empty());

    let mut out = String::with_capacity(provider.len());
    for (index, word) in words.enumerate() {
        let word = if word.chars().any(char::is_lowercase) {
            word.to_string()
        } else {
            word.to_lowercase()
        };
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if index == 0 {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_round_trip_strings() {
        for status in AssetStatus::ALL {
            let parsed: AssetStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("bogus".parse::<AssetStatus>().is_err());
        assert_eq!("READY".parse::<AssetStatus>().unwrap(), AssetStatus::Ready);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(AssetStatus::Processing).unwrap(), json!("processing"));
        assert_eq!(AssetStatus::default(), AssetStatus::Pending);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(AssetStatus::Ready.is_terminal());
        assert!(AssetStatus::Error.is_terminal());
        assert!(!AssetStatus::Uploading.is_terminal());
    }

    #[test]
    fn test_asset_uses_camel_case_keys() {
        let asset = Asset {
            status: AssetStatus::Ready,
            original_file_path: "videos/a.mp4".into(),
            provider: "mux".into(),
            blur_data_url: Some("data:image/png;base64,xx".into()),
            created_at: 1,
            updated_at: 2,
            ..Default::default()
        };
        let value = serde_json::to_value(&asset).unwrap();
        assert_eq!(value["originalFilePath"], "videos/a.mp4");
        assert_eq!(value["blurDataURL"], "data:image/png;base64,xx");
        assert_eq!(value["createdAt"], 1);
        assert_eq!(value["providerMetadata"], json!({}));
        assert!(value.get("poster").is_none());
        assert!(value.get("size").is_none());
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let input = json!({
            "status": "processing",
            "originalFilePath": "videos/a.mp4",
            "provider": "mux",
            "providerMetadata": { "mux": { "assetId": "abc" } },
            "createdAt": 10,
            "updatedAt": 20,
            "thumbnails": "https://image.mux.com/x/storyboard.vtt",
            "custom": { "nested": [1, 2, 3] }
        });
        let asset: Asset = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(asset.extra["custom"], json!({ "nested": [1, 2, 3] }));
        assert_eq!(serde_json::to_value(&asset).unwrap(), input);
    }

    #[test]
    fn test_unknown_source_fields_survive_round_trip() {
        let input = json!({
            "status": "ready",
            "originalFilePath": "videos/a.mp4",
            "provider": "mux",
            "providerMetadata": {},
            "sources": [
                { "src": "https://x/a.m3u8", "type": "application/x-mpegURL", "width": 1920 },
                { "src": "https://x/a.mp4", "label": "fallback" }
            ],
            "createdAt": 10,
            "updatedAt": 20
        });
        let asset: Asset = serde_json::from_value(input.clone()).unwrap();
        let sources = asset.sources.as_ref().unwrap();
        assert_eq!(sources[0].extra["width"], 1920);
        assert_eq!(sources[1].kind, None);
        assert_eq!(serde_json::to_value(&asset).unwrap(), input);
    }

    #[test]
    fn test_provider_metadata_for_canonicalizes() {
        let asset: Asset = serde_json::from_value(json!({
            "status": "ready",
            "originalFilePath": "a.mp4",
            "provider": "vercel-blob",
            "providerMetadata": { "vercelBlob": { "url": "https://blob/a.mp4" } }
        }))
        .unwrap();
        let meta = asset.provider_metadata_for(&asset.provider).unwrap();
        assert_eq!(meta["url"], "https://blob/a.mp4");
    }

    #[test]
    fn test_external_id() {
        let asset: Asset = serde_json::from_value(json!({
            "status": "ready",
            "originalFilePath": "a.mp4",
            "externalIds": { "playbackId": "pb1" }
        }))
        .unwrap();
        assert_eq!(asset.external_id("playbackId"), Some("pb1"));
        assert_eq!(asset.external_id("assetId"), None);
    }

    #[test]
    fn test_canonical_provider_id_variants() {
        assert_eq!(canonical_provider_id("MUX"), "mux");
        assert_eq!(canonical_provider_id("cloudflare_r2"), "cloudflareR2");
        assert_eq!(canonical_provider_id("Vercel Blob"), "vercelBlob");
        assert_eq!(canonical_provider_id(""), "");
    }
}
