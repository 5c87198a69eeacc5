//! Field-level authenticated encryption for personally-identifying data.
//!
//! Three stateless components:
//!
//! - [`KeyManager`] generates 256-bit keys and (de)serializes them as base64.
//! - [`CipherEngine`] encrypts UTF-8 text with AES-256-GCM into a single base64
//!   envelope (`nonce || ciphertext || tag`) and decrypts it back.
//! - [`redact`] masks sensitive strings for logs.
//!
//! No key is ever held globally; every operation takes one explicitly.
//!
//! ```
//! use field_crypto::{CipherEngine, KeyManager};
//!
//! let keys = KeyManager::new();
//! let key = keys.generate_key()?;
//! let engine = CipherEngine::new();
//!
//! let envelope = engine.encrypt("Hello, World!", &key)?;
//! assert_eq!(engine.decrypt(&envelope, &key)?, "Hello, World!");
//! # Ok::<(), field_crypto::SecurityError>(())
//! ```
//!
//! The [`server`] module wraps the same operations in a small HTTP sidecar
//! that transforms selected fields of JSON documents.

pub mod config;
pub mod crypto;
pub mod error;
pub mod fields;
pub mod keys;
pub mod redact;
pub mod rng;
pub mod server;
pub mod telemetry;

pub use crypto::{CipherEngine, Envelope};
pub use error::{CryptoError, ErrorKind, Operation, SecurityError};
pub use keys::{Algorithm, KeyManager, SymmetricKey};
pub use redact::{mask, Masked};
pub use rng::{OsRandom, SecureRandom};
