//! AES-256-GCM field encryption primitives.
//!
//! This module is free of HTTP and configuration concerns. It provides the
//! encrypt/decrypt operations used directly by callers and by the sidecar.
//!
//! # Ciphertext format
//!
//! ```text
//! base64( nonce[12] || ciphertext[N] || tag[16] )
//! ```
//!
//! Standard alphabet with padding. `N` equals the plaintext byte length.

pub mod cipher;
pub mod envelope;

pub use cipher::CipherEngine;
pub use envelope::{Envelope, MIN_ENVELOPE_LEN, NONCE_LEN, TAG_LEN};
