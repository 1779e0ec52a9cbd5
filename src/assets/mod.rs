//! Asset metadata lifecycle.
//!
//! # Module layout
//!
//! - [`resolver`] -- File reference to storage key derivation.
//! - [`store`] -- Remote (HTTP) and in-memory record stores.
//! - [`cache`] -- Memo of `ready` records.
//! - [`merge`] -- Deep merge used by updates.
//! - [`service`] -- The `get` / `create` / `update` operations.

pub mod cache;
pub mod merge;
pub mod resolver;
pub mod service;
pub mod store;

pub use cache::AssetCache;
pub use resolver::{asset_key, asset_path, ASSET_SUFFIX};
pub use service::AssetService;
pub use store::{AssetStore, HttpAssetStore, MemoryAssetStore};
