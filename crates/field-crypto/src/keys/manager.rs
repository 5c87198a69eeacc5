//! [`KeyManager`]: key generation and base64 (de)serialization.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;
use zeroize::Zeroizing;

use super::key::{SymmetricKey, KEY_LEN};
use crate::error::{CryptoError, Operation, SecurityError};
use crate::rng::{OsRandom, SecureRandom};

/// Generates, serializes and deserializes [`SymmetricKey`]s.
///
/// Holds no key itself; the only state is the random source.
#[derive(Debug, Clone, Default)]
pub struct KeyManager<R = OsRandom> {
    rng: R,
}

impl KeyManager {
    /// Key manager backed by the OS CSPRNG.
    pub fn new() -> Self {
        Self { rng: OsRandom }
    }
}

impl<R: SecureRandom> KeyManager<R> {
    /// Key manager drawing from a caller-supplied random source.
    pub fn with_random(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a fresh 256-bit key.
    ///
    /// # Errors
    ///
    /// Returns a [`SecurityError`] of kind
    /// [`ErrorKind::EntropyFailure`](crate::ErrorKind::EntropyFailure) if the
    /// random source fails. This is fatal; retrying is not useful.
    pub fn generate_key(&self) -> Result<SymmetricKey, SecurityError> {
        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        self.rng
            .fill(&mut bytes[..])
            .map_err(|e| SecurityError::new(Operation::GenerateKey, e))?;
        debug!("generated symmetric key");
        Ok(SymmetricKey::from_array(bytes))
    }

    /// Encode the raw key bytes as standard base64. No metadata is embedded.
    pub fn serialize(&self, key: &SymmetricKey) -> String {
        STANDARD.encode(key.as_bytes())
    }

    /// Rebuild a key from its [`serialize`](Self::serialize)d form.
    ///
    /// # Errors
    ///
    /// Returns a [`SecurityError`] of kind
    /// [`ErrorKind::InvalidEncoding`](crate::ErrorKind::InvalidEncoding) if
    /// `text` is not base64 or does not decode to exactly [`KEY_LEN`] bytes.
    /// Surrounding whitespace is not stripped and counts as invalid base64.
    pub fn deserialize(&self, text: &str) -> Result<SymmetricKey, SecurityError> {
        let raw = STANDARD
            .decode(text)
            .map(Zeroizing::new)
            .map_err(|_| SecurityError::new(Operation::DeserializeKey, CryptoError::InvalidBase64))?;
        SymmetricKey::from_slice(&raw).map_err(|e| SecurityError::new(Operation::DeserializeKey, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::rng::MockSecureRandom;

    #[test]
    fn generated_key_is_256_bits() {
        let km = KeyManager::new();
        let key = km.generate_key().unwrap();
        assert_eq!(key.as_bytes().len(), 32);
        assert_ne!(key.as_bytes(), &[0u8; KEY_LEN]);
    }

    #[test]
    fn generated_keys_differ() {
        let km = KeyManager::new();
        assert_ne!(km.generate_key().unwrap(), km.generate_key().unwrap());
    }

    #[test]
    fn entropy_failure_is_reported() {
        let mut rng = MockSecureRandom::new();
        rng.expect_fill()
            .returning(|_| Err(CryptoError::EntropyUnavailable));
        let km = KeyManager::with_random(rng);
        let err = km.generate_key().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntropyFailure);
        assert_eq!(err.operation(), Operation::GenerateKey);
        assert_eq!(err.to_string(), "failed to generate encryption key");
    }

    #[test]
    fn deterministic_source_yields_known_key() {
        let mut rng = MockSecureRandom::new();
        rng.expect_fill().times(1).returning(|dest| {
            dest.fill(0x11);
            Ok(())
        });
        let km = KeyManager::with_random(rng);
        let key = km.generate_key().unwrap();
        assert_eq!(key.as_bytes(), &[0x11u8; KEY_LEN]);
    }

    #[test]
    fn serialize_is_plain_base64() {
        let km = KeyManager::new();
        let key = SymmetricKey::from_slice(&[0u8; KEY_LEN]).unwrap();
        assert_eq!(
            km.serialize(&key),
            "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA="
        );
    }

    #[test]
    fn key_round_trip() {
        let km = KeyManager::new();
        let key = km.generate_key().unwrap();
        let text = km.serialize(&key);
        assert_eq!(km.deserialize(&text).unwrap(), key);
    }

    #[test]
    fn deserialize_rejects_invalid_base64() {
        let km = KeyManager::new();
        let err = km.deserialize("invalid-base64-string!!!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
        assert_eq!(err.cause(), &CryptoError::InvalidBase64);
    }

    #[test]
    fn deserialize_rejects_wrong_length() {
        let km = KeyManager::new();
        let short = STANDARD.encode([7u8; 16]);
        let err = km.deserialize(&short).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
        assert_eq!(err.cause(), &CryptoError::InvalidKeyLength(16));
        assert!(km.deserialize("").is_err());
    }

    #[test]
    fn deserialize_rejects_surrounding_whitespace() {
        let km = KeyManager::new();
        let text = km.serialize(&km.generate_key().unwrap());
        for padded in [format!(" {text}"), format!("{text}\n"), format!("\t{text} ")] {
            let err = km.deserialize(&padded).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
            assert_eq!(err.cause(), &CryptoError::InvalidBase64);
        }
    }
}
