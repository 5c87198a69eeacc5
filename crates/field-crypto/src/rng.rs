//! Secure random source used for key and nonce generation.
//!
//! Production code uses [`OsRandom`], backed by the operating system CSPRNG,
//! which is safe to share between threads. Tests can inject another
//! [`SecureRandom`] to make nonces reproducible.

use aes_gcm::aead::{rand_core::RngCore, OsRng};

use crate::error::CryptoError;

/// Capability to fill a buffer with cryptographically secure random bytes.
#[cfg_attr(test, mockall::automock)]
pub trait SecureRandom: Send + Sync {
    /// Fill `dest` completely.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EntropyUnavailable`] if the source cannot
    /// produce bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

/// Operating system CSPRNG (`getrandom`).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|_| CryptoError::EntropyUnavailable)
    }
}

impl<R: SecureRandom + ?Sized> SecureRandom for &R {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        (**self).fill(dest)
    }
}
