//! Opaque backend references.

use std::fmt;
use std::sync::Arc;

use crate::error::CoreError;

/// An opaque identifier for a graph element, issued by a storage backend.
///
/// The bytes are owned by the backend's encoding. Nothing above the storage
/// layer interprets them; iterators only compare, hash and order references.
/// Cloning is cheap because the bytes are shared.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ref(Arc<[u8]>);

impl Ref {
    /// Creates a reference from raw backend bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(Arc::from(bytes))
    }

    /// Returns the raw backend bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the encoded length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the reference carries no bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Backends keyed by `u64` ids encode them big-endian so ordering is preserved.
impl From<u64> for Ref {
    fn from(id: u64) -> Self {
        Self::from_bytes(&id.to_be_bytes())
    }
}

impl From<Vec<u8>> for Ref {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Arc::from(bytes))
    }
}

impl TryFrom<&Ref> for u64 {
    type Error = CoreError;

    fn try_from(r: &Ref) -> Result<Self, Self::Error> {
        let bytes: [u8; 8] = r
            .as_bytes()
            .try_into()
            .map_err(|_| CoreError::InvalidRef(format!("expected 8 bytes, got {}", r.len())))?;
        Ok(Self::from_be_bytes(bytes))
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ref({self})")
    }
}
