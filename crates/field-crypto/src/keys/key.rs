//! [`SymmetricKey`]: owned 256-bit key material.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// AEAD algorithm a key is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// AES-256 in Galois/Counter Mode, 96-bit nonce, 128-bit tag.
    Aes256Gcm,
}

impl Algorithm {
    /// Canonical identifier, e.g. for health reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Aes256Gcm => "AES-256-GCM",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-size key buffer holding exactly [`KEY_LEN`] bytes.
///
/// Immutable once built. The buffer is zeroed when the key is dropped, and
/// `Debug` never prints it.
#[derive(Clone)]
pub struct SymmetricKey {
    bytes: Zeroizing<[u8; KEY_LEN]>,
    algorithm: Algorithm,
}

impl SymmetricKey {
    /// Build a key from exactly [`KEY_LEN`] raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] for any other length.
    pub fn from_slice(raw: &[u8]) -> Result<Self, CryptoError> {
        if raw.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyLength(raw.len()));
        }
        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        bytes.copy_from_slice(raw);
        Ok(Self {
            bytes,
            algorithm: Algorithm::Aes256Gcm,
        })
    }

    pub(crate) fn from_array(bytes: Zeroizing<[u8; KEY_LEN]>) -> Self {
        Self {
            bytes,
            algorithm: Algorithm::Aes256Gcm,
        }
    }

    /// The raw key bytes. Callers must not log or persist them.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl PartialEq for SymmetricKey {
    fn eq(&self, other: &Self) -> bool {
        // No early exit on the first differing byte.
        let diff = self
            .bytes
            .iter()
            .zip(other.bytes.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));
        diff == 0 && self.algorithm == other.algorithm
    }
}

impl Eq for SymmetricKey {}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("algorithm", &self.algorithm)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
