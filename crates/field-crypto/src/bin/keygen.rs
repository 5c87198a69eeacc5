//! `field-crypto-keygen` — print a fresh base64 field key to stdout.
//!
//! Intended for provisioning `FIELD_KEY`. Diagnostics go to stderr so the
//! output can be piped straight into a secret store.

use anyhow::{Context, Result};
use tracing::info;

use field_crypto::KeyManager;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))?;

    let keys = KeyManager::new();
    let key = keys
        .generate_key()
        .context("entropy source failure; no key was produced")?;

    println!("{}", keys.serialize(&key));
    info!(algorithm = %key.algorithm(), "generated field key");
    Ok(())
}
