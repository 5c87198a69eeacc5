//! Structured logging setup.
//!
//! # Telemetry invariants
//!
//! - **No plaintext field values or key material** may appear in any span
//!   attribute or log field. Sensitive values go through
//!   [`crate::redact::Masked`] first.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence when set.

pub mod init;

pub use init::init;
