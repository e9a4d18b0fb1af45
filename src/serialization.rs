//! Zero-copy serialization utilities.
//!
//! Packed containers expose their backing words as [`Bytes`] together with a small
//! metadata record. Both can be stored anywhere; the container is rebuilt from them
//! with [`Serializable::from_bytes`].

use anybytes::Bytes;

use crate::error::Result;

/// Marker trait for metadata structures that can be safely written to and
/// read from bytes.
///
/// It is automatically implemented for any type that implements the necessary `zerocopy` traits.
pub trait Metadata:
    zerocopy::FromBytes + zerocopy::IntoBytes + zerocopy::KnownLayout + zerocopy::Immutable
{
}

impl<T> Metadata for T where
    T: zerocopy::FromBytes + zerocopy::IntoBytes + zerocopy::KnownLayout + zerocopy::Immutable
{
}

/// Types that can be exported to and reconstructed from [`Bytes`] using metadata.
pub trait Serializable: Sized {
    /// Metadata describing the byte layout required to reconstruct `Self`.
    type Meta: Metadata;

    /// Returns metadata for this instance.
    fn metadata(&self) -> Self::Meta;

    /// Returns the payload bytes of this instance.
    fn to_bytes(&self) -> Bytes;

    /// Rebuilds an instance from metadata and payload bytes.
    fn from_bytes(meta: Self::Meta, bytes: Bytes) -> Result<Self>;
}
