//! AES-256-GCM encryption and decryption of individual string fields.
//!
//! **Every call draws a fresh random 96-bit nonce.** GCM nonce reuse under one
//! key is catastrophic: it breaks both confidentiality and authentication.
//! Never add a code path that accepts a caller-chosen or cached nonce.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};

use super::envelope::{Envelope, NONCE_LEN};
use crate::error::{CryptoError, Operation, SecurityError};
use crate::keys::SymmetricKey;
use crate::rng::{OsRandom, SecureRandom};

/// Authenticated encryption of UTF-8 text into base64 [`Envelope`]s.
///
/// Stateless apart from its random source; one engine can be shared across
/// threads and used with any number of keys.
#[derive(Debug, Clone, Default)]
pub struct CipherEngine<R = OsRandom> {
    rng: R,
}

impl CipherEngine {
    /// Engine drawing nonces from the OS CSPRNG.
    pub fn new() -> Self {
        Self { rng: OsRandom }
    }
}

impl<R: SecureRandom> CipherEngine<R> {
    /// Engine drawing nonces from a caller-supplied random source.
    pub fn with_random(rng: R) -> Self {
        Self { rng }
    }

    /// Encrypt `plaintext` under `key` and return the base64 envelope.
    ///
    /// Empty input is returned unchanged without any cryptographic work, so
    /// blank fields stay blank in storage.
    ///
    /// # Errors
    ///
    /// Fails only if the random source cannot produce a nonce.
    pub fn encrypt(&self, plaintext: &str, key: &SymmetricKey) -> Result<String, SecurityError> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }
        self.seal(plaintext.as_bytes(), key)
            .map(|env| env.to_base64())
            .map_err(|e| SecurityError::new(Operation::Encrypt, e))
    }

    /// Decrypt a base64 envelope produced by [`encrypt`](Self::encrypt).
    ///
    /// Empty input yields empty output.
    ///
    /// # Errors
    ///
    /// - kind `InvalidEncoding` if `envelope` is not base64 or is shorter than
    ///   a nonce plus a tag.
    /// - kind `AuthenticationFailure` if the tag does not verify (wrong key or
    ///   tampered data). No plaintext is returned in that case.
    pub fn decrypt(&self, envelope: &str, key: &SymmetricKey) -> Result<String, SecurityError> {
        if envelope.is_empty() {
            return Ok(String::new());
        }
        let wrap = |e: CryptoError| SecurityError::new(Operation::Decrypt, e);
        let env = Envelope::parse(envelope).map_err(wrap)?;
        let plaintext = self.open(&env, key).map_err(wrap)?;
        String::from_utf8(plaintext).map_err(|_| wrap(CryptoError::InvalidUtf8))
    }

    /// Encrypt raw bytes into an [`Envelope`] under a fresh nonce.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EntropyUnavailable`] if no nonce can be drawn.
    pub fn seal(&self, plaintext: &[u8], key: &SymmetricKey) -> Result<Envelope, CryptoError> {
        let cipher = build_cipher(key);

        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng.fill(&mut nonce_bytes)?;
        let nonce = Nonce::from_slice(&nonce_bytes);

        // Output is `ciphertext || tag`.
        let sealed = cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| CryptoError::PlaintextTooLong)?;

        Envelope::from_parts(nonce_bytes, &sealed)
    }

    /// Verify and decrypt an [`Envelope`] back to raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::AuthenticationFailure`] if the tag does not verify.
    pub fn open(&self, envelope: &Envelope, key: &SymmetricKey) -> Result<Vec<u8>, CryptoError> {
        let cipher = build_cipher(key);
        let nonce = Nonce::from_slice(envelope.nonce());
        cipher
            .decrypt(nonce, envelope.sealed())
            .map_err(|_| CryptoError::AuthenticationFailure)
    }
}

fn build_cipher(key: &SymmetricKey) -> Aes256Gcm {
    Aes256Gcm::new(key.as_bytes().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{MIN_ENVELOPE_LEN, TAG_LEN};
    use crate::error::ErrorKind;
    use crate::keys::KEY_LEN;
    use crate::rng::MockSecureRandom;

    fn test_key() -> SymmetricKey {
        SymmetricKey::from_slice(&[0x42u8; KEY_LEN]).unwrap()
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let engine = CipherEngine::new();
        let key = test_key();
        let encrypted = engine.encrypt("taro.yamada@example.com", &key).unwrap();
        assert_ne!(encrypted, "taro.yamada@example.com");
        assert_eq!(engine.decrypt(&encrypted, &key).unwrap(), "taro.yamada@example.com");
    }

    #[test]
    fn empty_string_passes_through() {
        let engine = CipherEngine::new();
        let key = test_key();
        assert_eq!(engine.encrypt("", &key).unwrap(), "");
        assert_eq!(engine.decrypt("", &key).unwrap(), "");
    }

    #[test]
    fn empty_string_draws_no_nonce() {
        let mut rng = MockSecureRandom::new();
        rng.expect_fill().never();
        let engine = CipherEngine::with_random(rng);
        assert_eq!(engine.encrypt("", &test_key()).unwrap(), "");
    }

    #[test]
    fn envelope_layout_matches_plaintext_length() {
        let engine = CipherEngine::new();
        let env = engine.seal(b"123-4567", &test_key()).unwrap();
        assert_eq!(env.len(), NONCE_LEN + 8 + TAG_LEN);
        assert_eq!(env.ciphertext().len(), 8);
    }

    #[test]
    fn deterministic_nonce_is_placed_first() {
        let mut rng = MockSecureRandom::new();
        rng.expect_fill().times(1).returning(|dest| {
            for (i, b) in dest.iter_mut().enumerate() {
                *b = i as u8;
            }
            Ok(())
        });
        let engine = CipherEngine::with_random(rng);
        let env = engine.seal(b"secret", &test_key()).unwrap();
        let expected: Vec<u8> = (0..NONCE_LEN as u8).collect();
        assert_eq!(env.nonce(), expected.as_slice());
        assert_eq!(CipherEngine::new().open(&env, &test_key()).unwrap(), b"secret");
    }

    #[test]
    fn nonce_failure_is_entropy_error() {
        let mut rng = MockSecureRandom::new();
        rng.expect_fill()
            .returning(|_| Err(CryptoError::EntropyUnavailable));
        let engine = CipherEngine::with_random(rng);
        let err = engine.encrypt("data", &test_key()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntropyFailure);
        assert_eq!(err.to_string(), "failed to encrypt data");
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let engine = CipherEngine::new();
        let other = SymmetricKey::from_slice(&[0x43u8; KEY_LEN]).unwrap();
        let encrypted = engine.encrypt("Secret data", &test_key()).unwrap();
        let err = engine.decrypt(&encrypted, &other).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuthenticationFailure);
        assert_eq!(err.to_string(), "failed to decrypt data");
    }

    #[test]
    fn tampered_tag_fails_auth() {
        let engine = CipherEngine::new();
        let key = test_key();
        let env = engine.seal(b"Important data", &key).unwrap();
        let mut bytes = env.as_bytes().to_vec();
        let last = bytes.len() - 1;
        bytes[last] ^= 1;
        let tampered = Envelope::from_bytes(bytes).unwrap();
        assert_eq!(
            engine.open(&tampered, &key).unwrap_err(),
            CryptoError::AuthenticationFailure
        );
    }

    #[test]
    fn short_envelope_is_invalid_encoding() {
        use base64::{engine::general_purpose::STANDARD, Engine as _};
        let engine = CipherEngine::new();
        let short = STANDARD.encode([0u8; MIN_ENVELOPE_LEN - 1]);
        let err = engine.decrypt(&short, &test_key()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
        assert_eq!(err.cause(), &CryptoError::EnvelopeTooShort(27));
    }

    #[test]
    fn non_utf8_payload_is_rejected_after_auth() {
        let engine = CipherEngine::new();
        let key = test_key();
        let env = engine.seal(&[0xFF, 0xFE, 0xFD], &key).unwrap();
        let err = engine.decrypt(&env.to_base64(), &key).unwrap_err();
        assert_eq!(err.cause(), &CryptoError::InvalidUtf8);
    }

    #[test]
    fn error_text_never_contains_plaintext() {
        let engine = CipherEngine::new();
        let other = SymmetricKey::from_slice(&[0x01u8; KEY_LEN]).unwrap();
        let encrypted = engine.encrypt("VerySecretPassword123!", &test_key()).unwrap();
        let err = engine.decrypt(&encrypted, &other).unwrap_err();
        let text = format!("{err} {err:?}");
        assert!(!text.contains("VerySecret"));
    }
}
