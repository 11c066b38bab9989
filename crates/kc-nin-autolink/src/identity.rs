//! Identity number (NiN) handling.
//!
//! ## Security Note
//!
//! An identity number is a national identifier. It must never appear in
//! full in logs or diagnostics. [`IdentityNumber`] renders its masked form
//! through both `Display` and `Debug`; the raw value is only reachable via
//! [`IdentityNumber::as_str`], which is used for the directory lookup.

use std::fmt;

/// Placeholder substituted for the hidden part of an identity number.
pub const MASK_PLACEHOLDER: &str = "***";

/// Number of leading characters kept visible by [`mask_identity_number`].
const VISIBLE_PREFIX: usize = 6;

/// Number of trailing characters kept visible by [`mask_identity_number`].
const VISIBLE_SUFFIX: usize = 2;

/// Masks an identity number for diagnostics.
///
/// Values with at least 8 characters keep the first 6 and last 2 characters
/// around [`MASK_PLACEHOLDER`]. Shorter values are replaced entirely.
///
/// ```
/// use kc_nin_autolink::mask_identity_number;
///
/// assert_eq!(mask_identity_number("12345678901"), "123456***01");
/// assert_eq!(mask_identity_number("1234567"), "***");
/// ```
#[must_use]
pub fn mask_identity_number(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() < VISIBLE_PREFIX + VISIBLE_SUFFIX {
        return MASK_PLACEHOLDER.to_string();
    }

    let prefix: String = chars[..VISIBLE_PREFIX].iter().collect();
    let suffix: String = chars[chars.len() - VISIBLE_SUFFIX..].iter().collect();
    format!("{prefix}{MASK_PLACEHOLDER}{suffix}")
}

/// A trimmed, non-empty identity number.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IdentityNumber(String);

impl IdentityNumber {
    /// Parses a raw claim value.
    ///
    /// Surrounding whitespace is removed; an empty result is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the unmasked value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the masked form used in diagnostics.
    #[must_use]
    pub fn masked(&self) -> String {
        mask_identity_number(&self.0)
    }

    /// Replaces every occurrence of this number in `text` with its masked form.
    ///
    /// Used on host error messages, which may echo the queried username.
    #[must_use]
    pub fn redact(&self, text: &str) -> String {
        text.replace(self.0.as_str(), &self.masked())
    }
}

impl fmt::Display for IdentityNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl fmt::Debug for IdentityNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IdentityNumber").field(&self.masked()).finish()
    }
}
