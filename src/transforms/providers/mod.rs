//! Built-in provider transforms.

pub mod blob;
pub mod mux;

pub use blob::BlobTransform;
pub use mux::MuxTransform;
