//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::crypto::CipherEngine;
use crate::keys::SymmetricKey;

/// Application state shared across all request handlers.
///
/// All fields are `Arc`-wrapped so that Axum can clone the state for each
/// request without copying key material.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Stateless cipher engine backed by the OS CSPRNG.
    pub engine: Arc<CipherEngine>,
    /// Field key loaded from configuration; passed explicitly into every call.
    pub key: Arc<SymmetricKey>,
}

impl AppState {
    /// Create a new [`AppState`] around the configured field key.
    pub fn new(key: SymmetricKey) -> Self {
        Self {
            engine: Arc::new(CipherEngine::new()),
            key: Arc::new(key),
        }
    }
}
