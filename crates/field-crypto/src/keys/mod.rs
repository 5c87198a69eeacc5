//! Symmetric key material and its lifecycle.
//!
//! # Security invariants
//!
//! - Keys are never cached by the crate; every operation takes one explicitly.
//! - Key bytes are zeroed on drop and never appear in `Debug` output, logs, or
//!   error messages.

pub mod key;
pub mod manager;

pub use key::{Algorithm, SymmetricKey, KEY_LEN};
pub use manager::KeyManager;
