mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./vidasset.toml",
        "~/.config/vidasset/config.toml",
        "/etc/vidasset/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.provider.trim().is_empty() {
        anyhow::bail!("Provider cannot be empty");
    }

    if let Some(url) = &config.api_base_url {
        let parsed = reqwest::Url::parse(url)
            .with_context(|| format!("Invalid api_base_url: {url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("api_base_url must use http or https: {url}");
        }
    }

    if config.folder.trim().is_empty() {
        tracing::warn!("No asset folder configured; remote references cannot be resolved");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_apply_to_missing_fields() {
        let file = write_config("api_base_url = \"http://localhost:3000/api/video\"\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.provider, "mux");
        assert_eq!(config.folder, "videos");
        assert_eq!(
            config.require_api_base_url().unwrap(),
            "http://localhost:3000/api/video"
        );
        assert!(config.remote_source_asset_path.is_none());
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let file = write_config(
            "api_base_url = \"https://example.com/api\"\nprovider = \"vercel-blob\"\nfolder = \"media\"\n",
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.provider, "vercel-blob");
        assert_eq!(config.require_folder().unwrap(), "media");
    }

    #[test]
    fn rejects_empty_provider() {
        let file = write_config("provider = \"\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let file = write_config("api_base_url = \"ftp://example.com\"\n");
        assert!(load_config(file.path()).is_err());

        let file = write_config("api_base_url = \"not a url\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Path::new("/nonexistent/vidasset.toml")).is_err());
    }

    #[test]
    fn empty_folder_fails_require() {
        let config = Config {
            folder: "  ".into(),
            ..Config::default()
        };
        let err = config.require_folder().unwrap_err();
        assert!(matches!(err, vidasset_common::Error::Configuration(_)));
    }

    #[test]
    fn missing_base_url_fails_require() {
        let err = Config::default().require_api_base_url().unwrap_err();
        assert!(matches!(err, vidasset_common::Error::Configuration(_)));
    }

    #[test]
    fn custom_strategy_is_callable() {
        let config = Config::default().with_remote_source_asset_path(|url| format!("custom/{}", url.len()));
        let strategy = config.remote_source_asset_path.unwrap();
        assert_eq!(strategy.resolve("https://a.b/c"), "custom/13");
    }
}
