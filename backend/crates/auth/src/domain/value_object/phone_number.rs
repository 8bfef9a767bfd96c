//! Phone Number Value Object
//!
//! E.164-shaped numbers. Input is NFKC-normalised, common separators
//! (space, `-`, `.`, parentheses) are dropped, and what remains must be an
//! optional leading `+` followed by 3 to 15 digits. Short service numbers
//! such as `+1555` are accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const PHONE_MIN_DIGITS: usize = 3;
pub const PHONE_MAX_DIGITS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneNumberError {
    #[error("Phone number cannot be empty")]
    Empty,

    #[error("Phone number may only contain digits and a leading '+'")]
    InvalidCharacter,

    #[error("Phone number must have between {min} and {max} digits (got {actual})")]
    InvalidLength { min: usize, max: usize, actual: usize },
}

/// Canonical phone number, e.g. `+998901234567`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(input: impl AsRef<str>) -> Result<Self, PhoneNumberError> {
        let normalized: String = input
            .as_ref()
            .nfkc()
            .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
            .collect();

        if normalized.is_empty() {
            return Err(PhoneNumberError::Empty);
        }

        let digits = normalized.strip_prefix('+').unwrap_or(&normalized);
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneNumberError::InvalidCharacter);
        }

        let count = digits.len();
        if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&count) {
            return Err(PhoneNumberError::InvalidLength {
                min: PHONE_MIN_DIGITS,
                max: PHONE_MAX_DIGITS,
                actual: count,
            });
        }

        Ok(Self(normalized))
    }

    /// Trust a value read back from storage
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_e164() {
        let phone = PhoneNumber::new("+998901234567").unwrap();
        assert_eq!(phone.as_str(), "+998901234567");
    }

    #[test]
    fn test_accepts_short_numbers() {
        assert_eq!(PhoneNumber::new("+1555").unwrap().as_str(), "+1555");
        assert_eq!(PhoneNumber::new("911").unwrap().as_str(), "911");
    }

    #[test]
    fn test_strips_separators() {
        let phone = PhoneNumber::new(" +1 (415) 555-0100 ").unwrap();
        assert_eq!(phone.as_str(), "+14155550100");
    }

    #[test]
    fn test_full_width_digits_normalised() {
        let phone = PhoneNumber::new("９９８９０１２３４５６７").unwrap();
        assert_eq!(phone.as_str(), "998901234567");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(PhoneNumber::new("   ").unwrap_err(), PhoneNumberError::Empty);
        assert_eq!(
            PhoneNumber::new("+99890abc4567").unwrap_err(),
            PhoneNumberError::InvalidCharacter
        );
        assert_eq!(
            PhoneNumber::new("++998901234567").unwrap_err(),
            PhoneNumberError::InvalidCharacter
        );
        assert!(matches!(
            PhoneNumber::new("+12"),
            Err(PhoneNumberError::InvalidLength { actual: 2, .. })
        ));
        assert!(matches!(
            PhoneNumber::new("1234567890123456"),
            Err(PhoneNumberError::InvalidLength { actual: 16, .. })
        ));
    }

    #[test]
    fn test_serde_validates() {
        let ok: PhoneNumber = serde_json::from_str("\"+998 90 123 45 67\"").unwrap();
        assert_eq!(ok.as_str(), "+998901234567");
        assert!(serde_json::from_str::<PhoneNumber>("\"call me\"").is_err());
    }
}
