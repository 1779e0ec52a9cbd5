mod cli;

use vidasset::{
    assets::{self, AssetService},
    config, Asset, AssetStatus,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vidasset=trace,vidasset_common=debug".to_string()
        } else {
            "vidasset=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Get { file } => run_async(get_asset(&file, cli.config.as_deref())),
        Commands::Create { file, status } => {
            run_async(create_asset(&file, status.as_deref(), cli.config.as_deref()))
        }
        Commands::Update { file, patch } => {
            run_async(update_asset(&file, &patch, cli.config.as_deref()))
        }
        Commands::Key { file } => print_key(&file, cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("vidasset {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_async<F: std::future::Future<Output = Result<()>>>(future: F) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(future)
}

fn build_service(config_path: Option<&Path>) -> Result<AssetService> {
    let config = config::load_config_or_default(config_path)?;
    AssetService::from_config(config).context("Failed to set up asset service")
}

fn print_asset(asset: &Asset) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(asset)?);
    Ok(())
}

async fn get_asset(file: &str, config_path: Option<&Path>) -> Result<()> {
    let service = build_service(config_path)?;
    let asset = service
        .get(file)
        .await
        .with_context(|| format!("Failed to get asset for {file}"))?;
    print_asset(&asset)
}

async fn create_asset(file: &str, status: Option<&str>, config_path: Option<&Path>) -> Result<()> {
    let service = build_service(config_path)?;

    let overrides = match status {
        Some(status) => {
            let status: AssetStatus = status.parse()?;
            Some(serde_json::json!({ "status": status }))
        }
        None => None,
    };

    let asset = service
        .create(file, overrides)
        .await
        .with_context(|| format!("Failed to create asset for {file}"))?;
    print_asset(&asset)
}

async fn update_asset(file: &str, patch: &str, config_path: Option<&Path>) -> Result<()> {
    let patch: serde_json::Value =
        serde_json::from_str(patch).context("Patch is not valid JSON")?;
    let service = build_service(config_path)?;
    let asset = service
        .update(file, patch)
        .await
        .with_context(|| format!("Failed to update asset for {file}"))?;
    print_asset(&asset)
}

fn print_key(file: &str, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let key = assets::asset_key(&config, file)?;
    println!("{key}");
    Ok(())
}

fn validate_config(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    println!("Configuration is valid");
    println!(
        "API base URL: {}",
        config.api_base_url.as_deref().unwrap_or("(not set)")
    );
    println!("Provider: {}", config.provider);
    println!(
        "Folder: {}",
        if config.folder.is_empty() {
            "(not set)"
        } else {
            &config.folder
        }
    );

    Ok(())
}
