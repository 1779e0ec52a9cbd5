//! Storage key derivation for file references.
//!
//! A local reference is its own storage path. A remote reference is reduced to
//! `host + path`, decoded once, sanitized, and placed under the configured
//! asset folder. The metadata record lives at that path plus [`ASSET_SUFFIX`].

use std::path::Path;

use vidasset_common::paths::{is_remote, percent_decode, relative_to, sanitize_path_fragment};
use vidasset_common::{Error, Result};

use crate::config::Config;

/// Suffix appended to an asset path to form the metadata record key.
pub const ASSET_SUFFIX: &str = ".json";

/// Resolve the storage path of the media file behind `file_ref`.
///
/// Remote references require `folder` to be configured. A custom
/// `remote_source_asset_path` strategy, when present, replaces the default
/// URL reduction and its output is used as-is.
pub fn asset_path(config: &Config, file_ref: &str) -> Result<String> {
    if !is_remote(file_ref) {
        return Ok(file_ref.to_string());
    }

    let folder = config.require_folder()?;
    let fragment = match &config.remote_source_asset_path {
        Some(strategy) => strategy.resolve(file_ref),
        None => default_remote_source_asset_path(file_ref)?,
    };

    Ok(join_under(folder, &fragment))
}

/// Resolve the storage key of the metadata record for `file_ref`.
pub fn asset_key(config: &Config, file_ref: &str) -> Result<String> {
    Ok(format!("{}{}", asset_path(config, file_ref)?, ASSET_SUFFIX))
}

/// Reduce a remote URL to a sanitized `host/path` fragment.
///
/// Scheme, port, query string and fragment are dropped; the remainder is
/// percent-decoded exactly once before sanitizing.
pub fn default_remote_source_asset_path(url: &str) -> Result<String> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| Error::invalid_input(format!("invalid remote reference {url}: {e}")))?;
    let host = parsed.host_str().unwrap_or_default();
    let decoded = percent_decode(&format!("{host}{}", parsed.path()));
    Ok(sanitize_path_fragment(&decoded))
}

/// The `originalFilePath` recorded for `file_ref`.
///
/// Local paths are expressed relative to `cwd`; remote URLs are kept verbatim.
pub fn original_file_path(file_ref: &str, cwd: &Path) -> String {
    if is_remote(file_ref) {
        return file_ref.to_string();
    }
    relative_to(cwd, Path::new(file_ref))
        .to_string_lossy()
        .into_owned()
}

fn join_under(folder: &str, fragment: &str) -> String {
    let folder = folder.trim_end_matches('/');
    let fragment = fragment.trim_start_matches('/');
    if fragment.is_empty() {
        folder.to_string()
    } else {
        format!("{folder}/{fragment}")
    }
}
