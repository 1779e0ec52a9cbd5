//! Trait definition for provider transforms.

use vidasset_common::Asset;

/// Optional inputs a transform may use when deriving fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformProps {
    /// Time offset, in seconds, of the frame used for the poster.
    pub thumbnail_time: Option<f64>,
}

/// A pure function from record to record, owned by one provider.
///
/// Transforms must not perform I/O; they only reshape the record they are
/// given. Implementations are shared behind an `Arc` across tasks.
pub trait ProviderTransform: Send + Sync {
    /// Canonical (camelCase) identifier of the provider, e.g. `"vercelBlob"`.
    fn provider(&self) -> &str;

    /// Produce the transformed record.
    fn transform(&self, asset: Asset, props: Option<&TransformProps>) -> Asset;
}
