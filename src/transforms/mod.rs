//! Provider transforms applied to asset records on update.
//!
//! Each processing provider can reshape a record after its fields have been
//! merged, typically to derive playback `sources` and a `poster` from the
//! provider-private metadata it wrote.
//!
//! # Module layout
//!
//! - [`transform`] -- Trait definition and transform properties.
//! - [`registry`] -- Registry keyed by canonical provider identifier.
//! - [`providers`] -- Built-in transforms (Mux, URL-backed blob storage).

pub mod providers;
pub mod registry;
pub mod transform;

pub use providers::{BlobTransform, MuxTransform};
pub use registry::TransformRegistry;
pub use transform::{ProviderTransform, TransformProps};
