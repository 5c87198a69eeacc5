//! Error taxonomy for key handling and field encryption.
//!
//! [`CryptoError`] records the precise cause; [`SecurityError`] is the outer
//! failure handed to callers. Its `Display` is a fixed sentence per
//! [`Operation`], so neither plaintext nor key bytes can leak through
//! formatting.

use std::fmt;

use thiserror::Error;

use crate::crypto::MIN_ENVELOPE_LEN;
use crate::keys::KEY_LEN;

/// Coarse error classes that callers branch on.
///
/// None of them is retryable with the same inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The secure random source failed while drawing a key or a nonce.
    EntropyFailure,
    /// Malformed base64 or a wrong decoded length, for keys and envelopes.
    InvalidEncoding,
    /// Tag verification failed: wrong key, tampering, or truncation.
    AuthenticationFailure,
}

/// Precise cause of a crypto-layer failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The OS CSPRNG could not produce bytes.
    #[error("secure random source unavailable")]
    EntropyUnavailable,

    /// The input is not valid standard base64.
    #[error("input is not valid base64")]
    InvalidBase64,

    /// Decoded key material is not exactly [`KEY_LEN`] bytes.
    #[error("invalid key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The decoded envelope cannot even hold a nonce and a tag.
    #[error("envelope too short: expected at least {MIN_ENVELOPE_LEN} bytes, got {0}")]
    EnvelopeTooShort(usize),

    /// The plaintext exceeds the AES-GCM message size limit.
    #[error("plaintext too long")]
    PlaintextTooLong,

    /// The authenticated payload does not decode as UTF-8.
    #[error("decrypted payload is not valid UTF-8")]
    InvalidUtf8,

    /// AEAD tag verification failed.
    #[error("authentication failed")]
    AuthenticationFailure,
}

impl CryptoError {
    /// Map this cause onto the caller-facing [`ErrorKind`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::EntropyUnavailable => ErrorKind::EntropyFailure,
            CryptoError::InvalidBase64
            | CryptoError::InvalidKeyLength(_)
            | CryptoError::EnvelopeTooShort(_)
            | CryptoError::PlaintextTooLong
            | CryptoError::InvalidUtf8 => ErrorKind::InvalidEncoding,
            CryptoError::AuthenticationFailure => ErrorKind::AuthenticationFailure,
        }
    }
}

/// The public operation a [`SecurityError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GenerateKey,
    DeserializeKey,
    Encrypt,
    Decrypt,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::GenerateKey => "failed to generate encryption key",
            Operation::DeserializeKey => "failed to decode encryption key",
            Operation::Encrypt => "failed to encrypt data",
            Operation::Decrypt => "failed to decrypt data",
        })
    }
}

/// Generic failure returned by [`crate::KeyManager`] and [`crate::CipherEngine`].
#[derive(Debug, Error)]
#[error("{operation}")]
pub struct SecurityError {
    operation: Operation,
    #[source]
    source: CryptoError,
}

impl SecurityError {
    pub(crate) fn new(operation: Operation, source: CryptoError) -> Self {
        Self { operation, source }
    }

    /// The operation that failed.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The caller-facing error class.
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    /// The precise cause.
    pub fn cause(&self) -> &CryptoError {
        &self.source
    }
}
