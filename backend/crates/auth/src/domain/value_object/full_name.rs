//! Full Name Value Object

use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const FULL_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FullNameError {
    #[error("Full name cannot be empty")]
    Empty,

    #[error("Full name is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Full name contains control characters")]
    InvalidCharacter,
}

/// Display name. Any script is allowed; inner whitespace runs collapse to
/// one space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, FullNameError> {
        let normalized: String = input.as_ref().nfkc().collect();

        if normalized.chars().any(|c| c.is_control() && !c.is_whitespace()) {
            return Err(FullNameError::InvalidCharacter);
        }

        let collapsed = normalized.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            return Err(FullNameError::Empty);
        }

        let length = collapsed.chars().count();
        if length > FULL_NAME_MAX_LENGTH {
            return Err(FullNameError::TooLong {
                length,
                max: FULL_NAME_MAX_LENGTH,
            });
        }

        Ok(Self(collapsed))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        let name = FullName::new("  Ali \t  Valiyev ").unwrap();
        assert_eq!(name.as_str(), "Ali Valiyev");
    }

    #[test]
    fn test_non_latin_allowed() {
        assert!(FullName::new("Алишер Навоий").is_ok());
    }

    #[test]
    fn test_rejects() {
        assert_eq!(FullName::new(" \n ").unwrap_err(), FullNameError::Empty);
        assert_eq!(
            FullName::new("Ali\u{0000}").unwrap_err(),
            FullNameError::InvalidCharacter
        );
        assert!(matches!(
            FullName::new("x".repeat(FULL_NAME_MAX_LENGTH + 1)),
            Err(FullNameError::TooLong { .. })
        ));
    }
}
