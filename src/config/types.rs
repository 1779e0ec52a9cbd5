use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use vidasset_common::{Error, Result};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Base endpoint of the metadata API (`GET {base}/{key}`, `POST {base}`).
    pub api_base_url: Option<String>,

    /// Provider assigned to newly created assets.
    pub provider: String,

    /// Folder remote references are stored under. Empty means unset.
    pub folder: String,

    /// Custom strategy for turning a remote URL into a path fragment.
    #[serde(skip)]
    pub remote_source_asset_path: Option<RemoteSourceAssetPath>,
}

fn default_provider() -> String {
    "mux".to_string()
}

fn default_folder() -> String {
    "videos".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            provider: default_provider(),
            folder: default_folder(),
            remote_source_asset_path: None,
        }
    }
}

impl Config {
    /// Install a custom remote path strategy, replacing the default one.
    pub fn with_remote_source_asset_path<F>(mut self, strategy: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.remote_source_asset_path = Some(RemoteSourceAssetPath::new(strategy));
        self
    }

    /// The configured asset folder, or a configuration error when unset.
    pub fn require_folder(&self) -> Result<&str> {
        match self.folder.trim() {
            "" => Err(Error::configuration(
                "`folder` must be set to resolve remote asset references",
            )),
            folder => Ok(folder),
        }
    }

    /// The configured API base URL, or a configuration error when unset.
    pub fn require_api_base_url(&self) -> Result<&str> {
        match self.api_base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(Error::configuration(
                "`api_base_url` must be set to load or save assets",
            )),
        }
    }
}

/// User-supplied mapping from a remote URL to a sanitized path fragment.
#[derive(Clone)]
pub struct RemoteSourceAssetPath(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl RemoteSourceAssetPath {
    pub fn new<F>(strategy: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(strategy))
    }

    pub fn resolve(&self, url: &str) -> String {
        (self.0)(url)
    }
}

impl fmt::Debug for RemoteSourceAssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RemoteSourceAssetPath(<fn>)")
    }
}
