//! Configuration loading and validation for the field-crypto sidecar.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::keys::{KeyManager, SymmetricKey};

/// Validated sidecar configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Base64-encoded 256-bit field key (`FIELD_KEY`). **Required.**
    pub field_key: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_listen_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".into()
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_body_bytes() -> usize {
    1024 * 1024
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Decode [`Config::field_key`] into a [`SymmetricKey`].
    ///
    /// Surrounding whitespace, such as the trailing newline of a key read
    /// from a file into the environment, is stripped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not base64 or not 32 bytes long. The
    /// key text itself is never part of the message.
    pub fn field_key(&self) -> Result<SymmetricKey> {
        KeyManager::new()
            .deserialize(self.field_key.trim())
            .context("FIELD_KEY must be a base64-encoded 32-byte key")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.field_key.trim().is_empty() {
            anyhow::bail!("FIELD_KEY is required and must not be empty");
        }
        self.field_key()?;

        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be > 0");
        }
        if self.max_body_bytes == 0 {
            anyhow::bail!("MAX_BODY_BYTES must be > 0");
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The field key is secret; never print it.
        f.debug_struct("Config")
            .field("field_key", &"[REDACTED]")
            .field("listen_port", &self.listen_port)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_KEY: &str = "QkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkI=";

    fn config_with_key(key: &str) -> Config {
        Config {
            field_key: key.into(),
            listen_port: default_listen_port(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            max_body_bytes: default_max_body_bytes(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_listen_port(), 8080);
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_request_timeout(), 30);
        assert_eq!(default_max_body_bytes(), 1_048_576);
    }

    #[test]
    fn validate_accepts_valid_key() {
        let cfg = config_with_key(VALID_KEY);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.field_key().unwrap().as_bytes(), &[b'B'; 32]);
    }

    #[test]
    fn validate_rejects_empty_key() {
        assert!(config_with_key("  ").validate().is_err());
    }

    #[test]
    fn validate_rejects_short_key() {
        assert!(config_with_key("QkJCQg==").validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut cfg = config_with_key(VALID_KEY);
        cfg.request_timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn field_key_tolerates_trailing_newline() {
        let cfg = config_with_key(&format!("{VALID_KEY}\n"));
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.field_key().unwrap().as_bytes(), &[b'B'; 32]);
    }

    #[test]
    fn from_env_parses_values_and_applies_defaults() {
        for var in ["LOG_LEVEL", "REQUEST_TIMEOUT_SECS", "MAX_BODY_BYTES"] {
            std::env::remove_var(var);
        }
        std::env::set_var("FIELD_KEY", format!("{VALID_KEY}\n"));
        std::env::set_var("LISTEN_PORT", "9090");

        let cfg = Config::from_env();

        std::env::remove_var("FIELD_KEY");
        std::env::remove_var("LISTEN_PORT");

        let cfg = cfg.unwrap();
        assert_eq!(cfg.listen_port, 9090);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
        assert_eq!(cfg.max_body_bytes, 1_048_576);
        assert_eq!(cfg.field_key().unwrap().as_bytes(), &[b'B'; 32]);
    }

    #[test]
    fn debug_redacts_key() {
        let dbg = format!("{:?}", config_with_key(VALID_KEY));
        assert!(dbg.contains("REDACTED"));
        assert!(!dbg.contains(VALID_KEY));
    }
}
