//! Vidasset - Asset metadata tracking for provider-processed media
//!
//! This library crate exposes the asset lifecycle for the CLI and for
//! integration testing.

pub mod assets;
pub mod config;
pub mod transforms;

pub use vidasset_common::{Asset, AssetSource, AssetStatus, Error, Result};
