//! Vidasset-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across vidasset:
//!
//! - **Asset Record**: The open [`Asset`] record and its [`AssetStatus`] lifecycle
//! - **Provider Identifiers**: Canonicalization of provider names
//! - **Path Utilities**: Remote reference detection and path sanitizing
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use vidasset_common::{canonical_provider_id, AssetStatus, Error, Result};
//! use vidasset_common::paths::is_remote;
//!
//! assert!(is_remote("https://example.com/video.mp4"));
//! assert_eq!(canonical_provider_id("vercel-blob"), "vercelBlob");
//! assert!(AssetStatus::Ready.is_terminal());
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("videos/intro.mp4.json"))
//! }
//! ```

pub mod error;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
