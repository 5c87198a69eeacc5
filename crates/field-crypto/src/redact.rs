//! Partial-display masking of sensitive strings for logs and diagnostics.
//!
//! Unrelated to the cryptographic path: no keys, no randomness, no failures.
//! Lengths are counted in `char`s, so multi-byte characters count once.

use std::fmt;

/// Token substituted for the hidden part of a value.
pub const MASK: &str = "***";

/// Characters kept visible at each end of a long enough value.
const VISIBLE_CHARS: usize = 2;

/// Values of this many characters or fewer are masked completely.
const FULL_MASK_MAX_CHARS: usize = 4;

/// Mask `value` for logging.
///
/// Returns `***` for values of at most four characters; otherwise the first
/// two characters, `***`, and the last two, e.g. `"sensitive123data"` →
/// `"se***ta"`.
pub fn mask(value: &str) -> String {
    let count = value.chars().count();
    if count <= FULL_MASK_MAX_CHARS {
        return MASK.to_owned();
    }
    let head: String = value.chars().take(VISIBLE_CHARS).collect();
    let tail: String = value.chars().skip(count - VISIBLE_CHARS).collect();
    format!("{head}{MASK}{tail}")
}

/// [`mask`] for optional values; `None` masks to `***`.
pub fn mask_opt(value: Option<&str>) -> String {
    value.map_or_else(|| MASK.to_owned(), mask)
}

/// `Display` adapter that prints the masked form of a value.
///
/// Intended for structured log fields:
///
/// ```
/// use field_crypto::redact::Masked;
/// let email = "taro@example.com";
/// assert_eq!(Masked(email).to_string(), "ta***om");
/// ```
#[derive(Clone, Copy)]
pub struct Masked<'a>(pub &'a str);

impl fmt::Display for Masked<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mask(self.0))
    }
}

impl fmt::Debug for Masked<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", mask(self.0))
    }
}
