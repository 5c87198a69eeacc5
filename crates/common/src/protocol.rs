//! Request and response types exchanged with the field-crypto sidecar.
//!
//! These types are serialised as JSON over the HTTP API. Encrypted values are
//! opaque base64 envelope strings; clients must not interpret or re-encode them.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Encrypt / decrypt endpoints
// ---------------------------------------------------------------------------

/// Request body for `POST /encrypt` and `POST /decrypt`.
///
/// `fields` lists dot-notation paths into `payload` whose string leaves are
/// transformed, e.g. `"email"`, `"contact.phone"`, `"engineers[].address"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldsRequest {
    /// Arbitrary JSON document holding the sensitive fields.
    pub payload: serde_json::Value,
    /// Paths of the fields to encrypt or decrypt.
    pub fields: Vec<String>,
}

/// Successful response body for `POST /encrypt` and `POST /decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldsResponse {
    /// The input document with the selected fields transformed.
    pub payload: serde_json::Value,
    /// Number of string leaves the requested paths resolved to.
    pub transformed: usize,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(err: &crate::ServiceError) -> Self {
        Self::new(err.code(), err.message())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status, `"ok"` when a key is loaded.
    pub status: String,
    /// AEAD algorithm identifier of the loaded key, e.g. `"AES-256-GCM"`.
    pub algorithm: String,
    /// Service version.
    pub version: String,
}
