//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::DecryptionFailure`] → 422
/// - [`ServiceError::PayloadTooLarge`] → 413
/// - [`ServiceError::EncryptionFailure`] → 500
///
/// Messages carried by these variants are shown to callers verbatim, so they
/// must never contain plaintext field values or key material.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed: bad JSON, bad field path, or bad envelope encoding.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// An envelope failed authentication (wrong key or tampered data).
    #[error("decryption failure: {0}")]
    DecryptionFailure(String),

    /// Encryption failed due to a crypto-layer error.
    #[error("encryption failure: {0}")]
    EncryptionFailure(String),

    /// The request body exceeded the configured size limit.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::DecryptionFailure(_) => 422,
            ServiceError::EncryptionFailure(_) => 500,
            ServiceError::PayloadTooLarge(_) => 413,
        }
    }

    /// Short machine-readable code used in [`crate::protocol::ErrorResponse`].
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::DecryptionFailure(_) => "decryption_failed",
            ServiceError::EncryptionFailure(_) => "encryption_failed",
            ServiceError::PayloadTooLarge(_) => "payload_too_large",
        }
    }

    /// The caller-safe message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::BadRequest(m)
            | ServiceError::DecryptionFailure(m)
            | ServiceError::EncryptionFailure(m)
            | ServiceError::PayloadTooLarge(m) => m,
        }
    }
}
