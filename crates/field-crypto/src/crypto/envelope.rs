//! [`Envelope`]: the `nonce || ciphertext || tag` unit produced by one encryption.

use std::{fmt, str::FromStr};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::CryptoError;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// Smallest well-formed envelope: a nonce and a tag around zero ciphertext bytes.
pub const MIN_ENVELOPE_LEN: usize = NONCE_LEN + TAG_LEN;

/// One encrypted value.
///
/// The canonical byte layout is
///
/// ```text
/// nonce (12) || ciphertext (N) || tag (16)
/// ```
///
/// and the textual form is that byte string in standard base64. Envelopes are
/// immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Envelope {
    bytes: Vec<u8>,
}

impl Envelope {
    /// Assemble an envelope from a nonce and the AEAD output (`ciphertext || tag`).
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EnvelopeTooShort`] if `sealed` cannot hold a tag.
    pub fn from_parts(nonce: [u8; NONCE_LEN], sealed: &[u8]) -> Result<Self, CryptoError> {
        if sealed.len() < TAG_LEN {
            return Err(CryptoError::EnvelopeTooShort(NONCE_LEN + sealed.len()));
        }
        let mut bytes = Vec::with_capacity(NONCE_LEN + sealed.len());
        bytes.extend_from_slice(&nonce);
        bytes.extend_from_slice(sealed);
        Ok(Self { bytes })
    }

    /// Wrap raw envelope bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EnvelopeTooShort`] if fewer than
    /// [`MIN_ENVELOPE_LEN`] bytes are given.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, CryptoError> {
        if bytes.len() < MIN_ENVELOPE_LEN {
            return Err(CryptoError::EnvelopeTooShort(bytes.len()));
        }
        Ok(Self { bytes })
    }

    /// Decode the textual (base64) form.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidBase64`] or
    /// [`CryptoError::EnvelopeTooShort`]; no cryptographic work is done here.
    pub fn parse(text: &str) -> Result<Self, CryptoError> {
        let bytes = STANDARD
            .decode(text)
            .map_err(|_| CryptoError::InvalidBase64)?;
        Self::from_bytes(bytes)
    }

    /// Encode to the canonical textual (base64) form.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn nonce(&self) -> &[u8] {
        &self.bytes[..NONCE_LEN]
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.bytes[NONCE_LEN..self.bytes.len() - TAG_LEN]
    }

    pub fn tag(&self) -> &[u8] {
        &self.bytes[self.bytes.len() - TAG_LEN..]
    }

    /// `ciphertext || tag`, the input the AEAD decryptor expects.
    pub(crate) fn sealed(&self) -> &[u8] {
        &self.bytes[NONCE_LEN..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total byte length, `12 + N + 16`.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`: a valid envelope holds at least a nonce and a tag.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl FromStr for Envelope {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
