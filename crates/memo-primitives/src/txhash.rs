//! Transaction hash type.
//!
//! A 32-byte hash stored in internal (little-endian) byte order and
//! displayed byte-reversed, matching the convention used for transaction
//! IDs on Bitcoin-lineage chains.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Size of a transaction hash in bytes.
pub const HASH_SIZE: usize = 32;

/// A 32-byte transaction hash.
///
/// The bytes are stored in internal (wire) order. The string form is
/// byte-reversed, so `TxHash::from_hex` accepts the display-order hex
/// that explorers and RPC interfaces use.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct TxHash([u8; HASH_SIZE]);

impl TxHash {
    /// Create a hash from a raw 32-byte array in internal byte order.
    pub fn new(bytes: [u8; HASH_SIZE]) -> Self {
        TxHash(bytes)
    }

    /// Create a hash from a byte slice in internal byte order.
    ///
    /// # Arguments
    /// * `bytes` - A slice that must be exactly 32 bytes.
    ///
    /// # Returns
    /// `Ok(TxHash)` if the slice is 32 bytes, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != HASH_SIZE {
            return Err(PrimitivesError::InvalidHash(format!(
                "invalid hash length of {}, want {}",
                bytes.len(),
                HASH_SIZE
            )));
        }
        let mut arr = [0u8; HASH_SIZE];
        arr.copy_from_slice(bytes);
        Ok(TxHash(arr))
    }

    /// Create a hash from a display-order (byte-reversed) hex string.
    ///
    /// # Arguments
    /// * `hex_str` - A 64-character hex string in display order.
    ///
    /// # Returns
    /// `Ok(TxHash)` on success, or an error for invalid input.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.len() != HASH_SIZE * 2 {
            return Err(PrimitivesError::InvalidHash(format!(
                "invalid hash hex length of {}, want {}",
                hex_str.len(),
                HASH_SIZE * 2
            )));
        }
        let decoded = hex::decode(hex_str)?;
        let mut arr = [0u8; HASH_SIZE];
        for (i, b) in decoded.iter().rev().enumerate() {
            arr[i] = *b;
        }
        Ok(TxHash(arr))
    }

    /// Compute the double-SHA-256 of the given data as a `TxHash`.
    ///
    /// # Arguments
    /// * `data` - The serialized transaction bytes.
    ///
    /// # Returns
    /// A `TxHash` of the data in internal byte order.
    pub fn double_hash(data: &[u8]) -> Self {
        TxHash(sha256d(data))
    }

    /// Access the internal byte array.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

/// Display the hash as byte-reversed hex.
impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        write!(f, "{}", hex::encode(reversed))
    }
}

/// Parse a display-order hex string into a hash.
impl FromStr for TxHash {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TxHash::from_hex(s)
    }
}

/// Serialize as a display-order hex string in JSON.
impl Serialize for TxHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Deserialize from a display-order hex string in JSON.
impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TxHash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
