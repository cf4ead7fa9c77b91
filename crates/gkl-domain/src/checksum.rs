//! Content checksums for registry entries
//!
//! Provides [`ContentChecksum`], a strongly-typed 32-byte Blake3 digest
//! used as the change-detection etag on document registry rows.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A 32-byte content checksum (Blake3)
///
/// Written by the scanning collaborator when a blob version is observed;
/// this engine treats it as an opaque equality token. Immutable and cheap
/// to clone (Copy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentChecksum([u8; 32]);

impl ContentChecksum {
    /// Create a checksum from raw bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get reference to the underlying bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Compute the Blake3 checksum of arbitrary data
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        let hash = blake3::hash(data);
        Self::new(*hash.as_bytes())
    }

    /// Create a checksum from a byte slice
    ///
    /// # Errors
    /// Returns an error if the slice length is not exactly 32 bytes
    #[inline]
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ChecksumError> {
        if bytes.len() != 32 {
            return Err(ChecksumError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ContentChecksum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for ContentChecksum {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }
}

impl Default for ContentChecksum {
    fn default() -> Self {
        Self([0; 32])
    }
}

impl serde::Serialize for ContentChecksum {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ContentChecksum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when working with content checksums
#[derive(Debug, thiserror::Error)]
pub enum ChecksumError {
    /// Invalid checksum length
    #[error("invalid checksum length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Hex encoding error
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_compute_deterministic() {
        let a = ContentChecksum::compute(b"prospectus v3");
        let b = ContentChecksum::compute(b"prospectus v3");
        assert_eq!(a, b);
    }

    #[test]
    fn checksum_compute_different_data() {
        let a = ContentChecksum::compute(b"v1");
        let b = ContentChecksum::compute(b"v2");
        assert_ne!(a, b);
    }

    #[test]
    fn checksum_display_and_parse() {
        let sum = ContentChecksum::compute(b"blob");
        let parsed: ContentChecksum = sum.to_string().parse().unwrap();
        assert_eq!(sum, parsed);
    }

    #[test]
    fn checksum_from_slice_invalid_length() {
        let result = ContentChecksum::from_slice(&[0u8; 31]);
        assert!(matches!(
            result,
            Err(ChecksumError::InvalidLength { expected: 32, actual: 31 })
        ));
    }

    #[test]
    fn checksum_short() {
        let sum = ContentChecksum::compute(b"blob");
        assert_eq!(sum.short().len(), 16);
        assert!(sum.to_string().starts_with(&sum.short()));
    }

    #[test]
    fn checksum_serde_as_hex_string() {
        let sum = ContentChecksum::compute(b"blob");
        let json = serde_json::to_string(&sum).unwrap();
        assert!(json.starts_with('"'));
        let back: ContentChecksum = serde_json::from_str(&json).unwrap();
        assert_eq!(sum, back);
    }
}
