//! Mux transform.
//!
//! Derives HLS playback sources, a poster frame and a storyboard URL from the
//! Mux playback id stored in `providerMetadata.mux.playbackId`. Records
//! written before `providerMetadata` existed carry the id in
//! `externalIds.playbackId` instead.

use serde_json::{json, Value};
use vidasset_common::{Asset, AssetSource};

use crate::transforms::transform::{ProviderTransform, TransformProps};

const STREAM_BASE: &str = "https://stream.mux.com";
const IMAGE_BASE: &str = "https://image.mux.com";
const HLS_MIME: &str = "application/x-mpegURL";

/// Transform for assets hosted on Mux Video.
#[derive(Debug, Clone, Copy, Default)]
pub struct MuxTransform;

impl MuxTransform {
    fn playback_id(asset: &Asset) -> Option<String> {
        asset
            .provider_metadata
            .get("mux")
            .and_then(|meta| meta.get("playbackId"))
            .and_then(Value::as_str)
            .or_else(|| asset.external_id("playbackId"))
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }
}

impl ProviderTransform for MuxTransform {
    fn provider(&self) -> &str {
        "mux"
    }

    fn transform(&self, mut asset: Asset, props: Option<&TransformProps>) -> Asset {
        let Some(playback_id) = Self::playback_id(&asset) else {
            return asset;
        };

        asset.sources = Some(vec![AssetSource::new(
            format!("{STREAM_BASE}/{playback_id}.m3u8"),
            Some(HLS_MIME.to_string()),
        )]);

        if asset.poster.is_none() {
            let time = props
                .and_then(|p| p.thumbnail_time)
                .map(|t| format!("?time={t}"))
                .unwrap_or_default();
            asset.poster = Some(format!("{IMAGE_BASE}/{playback_id}/thumbnail.webp{time}"));
        }

        asset.extra.insert(
            "thumbnails".to_string(),
            json!(format!("{IMAGE_BASE}/{playback_id}/storyboard.vtt")),
        );

        asset
    }
}
