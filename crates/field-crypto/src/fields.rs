//! Encrypt or decrypt selected string leaves of a JSON document.
//!
//! Fields are addressed with dot-notation paths. Array fields use the `[]`
//! suffix before the dot separator, e.g. `"engineers[].phone"`.
//!
//! Missing fields and non-string leaves are skipped: a path only says where
//! sensitive data *may* live.

use serde_json::Value;
use thiserror::Error;
use tracing::trace;

use crate::crypto::CipherEngine;
use crate::error::SecurityError;
use crate::keys::SymmetricKey;
use crate::redact::Masked;
use crate::rng::SecureRandom;

/// Errors from field-path parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldPathError {
    /// The path string is empty.
    #[error("field path is empty")]
    Empty,

    /// A segment between dots is empty, e.g. `"user..email"`.
    #[error("field path {0:?} contains an empty segment")]
    EmptySegment(String),
}

/// Segments of a dot-notation field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Navigate into an object property by name.
    Key(String),
    /// Expand into every element of a JSON array.
    ArrayItem,
}

/// Parse a dot-notation path into a list of [`PathSegment`]s.
///
/// `"orders[].card_number"` → `[Key("orders"), ArrayItem, Key("card_number")]`.
/// A leading `"[]"` addresses the elements of a top-level array.
///
/// # Errors
///
/// Returns [`FieldPathError`] for an empty path or an empty segment.
pub fn parse_path(path: &str) -> Result<Vec<PathSegment>, FieldPathError> {
    if path.is_empty() {
        return Err(FieldPathError::Empty);
    }
    let mut segments = Vec::new();
    for part in path.split('.') {
        let (key, is_array) = match part.strip_suffix("[]") {
            Some(key) => (key, true),
            None => (part, false),
        };
        if key.is_empty() && !(is_array && segments.is_empty()) {
            return Err(FieldPathError::EmptySegment(path.to_owned()));
        }
        if !key.is_empty() {
            segments.push(PathSegment::Key(key.to_owned()));
        }
        if is_array {
            segments.push(PathSegment::ArrayItem);
        }
    }
    Ok(segments)
}

/// Parse every path up front so a bad path fails before any field is touched.
///
/// # Errors
///
/// Returns the first [`FieldPathError`] encountered.
pub fn parse_paths<S: AsRef<str>>(paths: &[S]) -> Result<Vec<Vec<PathSegment>>, FieldPathError> {
    paths.iter().map(|p| parse_path(p.as_ref())).collect()
}

/// Recursively navigate `value` following `segments` and apply `f` to any
/// string leaf found at the end of the path. Returns the number of leaves
/// rewritten.
fn transform_at_path<F, E>(value: &mut Value, segments: &[PathSegment], f: &mut F) -> Result<usize, E>
where
    F: FnMut(&str) -> Result<String, E>,
{
    let Some((first, rest)) = segments.split_first() else {
        if let Value::String(s) = value {
            *s = f(s)?;
            return Ok(1);
        }
        return Ok(0);
    };

    match first {
        PathSegment::Key(key) => match value {
            Value::Object(map) => match map.get_mut(key) {
                Some(child) => transform_at_path(child, rest, f),
                None => Ok(0),
            },
            _ => Ok(0),
        },
        PathSegment::ArrayItem => match value {
            Value::Array(items) => {
                let mut count = 0;
                for item in items.iter_mut() {
                    count += transform_at_path(item, rest, f)?;
                }
                Ok(count)
            }
            _ => Ok(0),
        },
    }
}

/// Apply `f` to every string leaf addressed by `paths`.
///
/// # Errors
///
/// Stops at and returns the first error from `f`; `payload` may then be
/// partially transformed, so callers should discard it.
pub fn transform_fields<F, E>(
    payload: &mut Value,
    paths: &[Vec<PathSegment>],
    mut f: F,
) -> Result<usize, E>
where
    F: FnMut(&str) -> Result<String, E>,
{
    let mut count = 0;
    for segments in paths {
        count += transform_at_path(payload, segments, &mut f)?;
    }
    Ok(count)
}

/// Encrypt all string fields in `payload` addressed by `paths`.
///
/// Empty strings stay empty, following [`CipherEngine::encrypt`].
///
/// # Errors
///
/// Returns the first [`SecurityError`]; discard `payload` in that case.
pub fn encrypt_fields<R: SecureRandom>(
    engine: &CipherEngine<R>,
    payload: &mut Value,
    paths: &[Vec<PathSegment>],
    key: &SymmetricKey,
) -> Result<usize, SecurityError> {
    transform_fields(payload, paths, |plain| {
        trace!(value = %Masked(plain), "encrypting field");
        engine.encrypt(plain, key)
    })
}

/// Decrypt all string fields in `payload` addressed by `paths`.
///
/// # Errors
///
/// Returns the first [`SecurityError`]; no decrypted value should be used
/// from `payload` in that case.
pub fn decrypt_fields<R: SecureRandom>(
    engine: &CipherEngine<R>,
    payload: &mut Value,
    paths: &[Vec<PathSegment>],
    key: &SymmetricKey,
) -> Result<usize, SecurityError> {
    transform_fields(payload, paths, |envelope| engine.decrypt(envelope, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::keys::KEY_LEN;
    use serde_json::json;

    fn key() -> SymmetricKey {
        SymmetricKey::from_slice(&[0x42u8; KEY_LEN]).unwrap()
    }

    fn paths(raw: &[&str]) -> Vec<Vec<PathSegment>> {
        parse_paths(raw).unwrap()
    }

    #[test]
    fn parse_path_flat() {
        let segs = parse_path("email").unwrap();
        assert_eq!(segs, vec![PathSegment::Key("email".into())]);
    }

    #[test]
    fn parse_path_nested() {
        let segs = parse_path("contact.address.postal_code").unwrap();
        assert_eq!(segs.len(), 3);
    }

    #[test]
    fn parse_path_array() {
        let segs = parse_path("engineers[].phone").unwrap();
        assert_eq!(
            segs,
            vec![
                PathSegment::Key("engineers".into()),
                PathSegment::ArrayItem,
                PathSegment::Key("phone".into()),
            ]
        );
    }

    #[test]
    fn parse_path_top_level_array() {
        let segs = parse_path("[].email").unwrap();
        assert_eq!(segs, vec![PathSegment::ArrayItem, PathSegment::Key("email".into())]);
    }

    #[test]
    fn parse_path_rejects_empty() {
        assert_eq!(parse_path(""), Err(FieldPathError::Empty));
        assert!(matches!(parse_path("a..b"), Err(FieldPathError::EmptySegment(_))));
        assert!(matches!(parse_path("a."), Err(FieldPathError::EmptySegment(_))));
        assert!(matches!(parse_path("a.[]"), Err(FieldPathError::EmptySegment(_))));
    }

    #[test]
    fn encrypt_flat_field() {
        let engine = CipherEngine::new();
        let mut val = json!({"email": "taro@example.com", "name": "Taro"});
        let n = encrypt_fields(&engine, &mut val, &paths(&["email"]), &key()).unwrap();
        assert_eq!(n, 1);
        assert_ne!(val["email"], "taro@example.com");
        assert_eq!(val["name"], "Taro");
    }

    #[test]
    fn encrypt_then_decrypt_nested_and_array_fields() {
        let engine = CipherEngine::new();
        let original = json!({
            "contact": {"address": {"postal_code": "100-0001"}},
            "engineers": [
                {"phone": "090-1111-2222"},
                {"phone": "080-3333-4444"},
                {"phone": 42}
            ]
        });
        let p = paths(&["contact.address.postal_code", "engineers[].phone"]);
        let mut val = original.clone();
        assert_eq!(encrypt_fields(&engine, &mut val, &p, &key()).unwrap(), 3);
        assert_ne!(val, original);
        assert_eq!(val["engineers"][2]["phone"], 42);
        assert_eq!(decrypt_fields(&engine, &mut val, &p, &key()).unwrap(), 3);
        assert_eq!(val, original);
    }

    #[test]
    fn missing_field_is_noop() {
        let engine = CipherEngine::new();
        let mut val = json!({"name": "Hanako"});
        let n = encrypt_fields(&engine, &mut val, &paths(&["email", "a.b[].c"]), &key()).unwrap();
        assert_eq!(n, 0);
        assert_eq!(val, json!({"name": "Hanako"}));
    }

    #[test]
    fn empty_field_stays_empty() {
        let engine = CipherEngine::new();
        let mut val = json!({"email": ""});
        encrypt_fields(&engine, &mut val, &paths(&["email"]), &key()).unwrap();
        assert_eq!(val["email"], "");
    }

    #[test]
    fn decrypt_with_wrong_key_fails() {
        let engine = CipherEngine::new();
        let other = SymmetricKey::from_slice(&[0x07u8; KEY_LEN]).unwrap();
        let mut val = json!({"email": "taro@example.com"});
        let p = paths(&["email"]);
        encrypt_fields(&engine, &mut val, &p, &key()).unwrap();
        let err = decrypt_fields(&engine, &mut val, &p, &other).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuthenticationFailure);
    }
}
