//! User Name Value Object
//!
//! Login handle for password accounts (admins). Phone-registered clients
//! have none.
//!
//! ## Rules
//! - NFKC normalisation, trim, then lowercase (the canonical form)
//! - 3 to 30 characters from `a-z`, `0-9`, `_`, `.`, `-`
//! - Starts and ends with a letter, digit or `_`
//! - No `..`

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    Empty,
    TooShort { length: usize, min: usize },
    TooLong { length: usize, max: usize },
    InvalidCharacter { char: char, position: usize },
    InvalidStart { char: char },
    InvalidEnd { char: char },
    ConsecutiveDots,
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "User name cannot be empty"),
            Self::TooShort { length, min } => {
                write!(f, "User name is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "User name is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => write!(
                f,
                "Invalid character '{char}' at position {position}. Only a-z, 0-9, _, ., - are allowed"
            ),
            Self::InvalidStart { char } => write!(f, "User name cannot start with '{char}'"),
            Self::InvalidEnd { char } => write!(f, "User name cannot end with '{char}'"),
            Self::ConsecutiveDots => write!(f, "User name cannot contain consecutive dots (..)"),
        }
    }
}

impl std::error::Error for UserNameError {}

/// Validated, canonical (lowercase) user name
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let canonical = input
            .as_ref()
            .nfkc()
            .collect::<String>()
            .trim()
            .to_lowercase();
        Self::validate(&canonical)?;
        Ok(Self(canonical))
    }

    /// Create from database value (assumes already validated)
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(canonical: &str) -> Result<(), UserNameError> {
        let (Some(first), Some(last)) = (canonical.chars().next(), canonical.chars().next_back())
        else {
            return Err(UserNameError::Empty);
        };

        let length = canonical.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                length,
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if let Some((position, char)) = canonical
            .chars()
            .enumerate()
            .find(|(_, c)| !Self::is_valid_char(*c))
        {
            return Err(UserNameError::InvalidCharacter { char, position });
        }

        if !Self::is_valid_start_end_char(first) {
            return Err(UserNameError::InvalidStart { char: first });
        }
        if !Self::is_valid_start_end_char(last) {
            return Err(UserNameError::InvalidEnd { char: last });
        }

        if canonical.contains("..") {
            return Err(UserNameError::ConsecutiveDots);
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }

    #[inline]
    fn is_valid_start_end_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.0).finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod normalization {
        use super::*;

        #[test]
        fn test_trim_and_lowercase() {
            let name = UserName::new("  Root_Admin  ").unwrap();
            assert_eq!(name.as_str(), "root_admin");
        }

        #[test]
        fn test_nfkc_normalization() {
            // Full-width 'Ａ' (U+FF21) becomes 'a'
            assert_eq!(UserName::new("Ａdmin").unwrap().as_str(), "admin");
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn test_length_bounds() {
            assert_eq!(UserName::new("").unwrap_err(), UserNameError::Empty);
            assert_eq!(UserName::new("   ").unwrap_err(), UserNameError::Empty);
            assert_eq!(
                UserName::new("ab").unwrap_err(),
                UserNameError::TooShort { length: 2, min: 3 }
            );
            assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
            assert!(matches!(
                UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)),
                Err(UserNameError::TooLong { .. })
            ));
        }

        #[test]
        fn test_characters() {
            assert!(UserName::new("ops.admin-2").is_ok());
            assert!(matches!(
                UserName::new("ops@admin"),
                Err(UserNameError::InvalidCharacter { char: '@', position: 3 })
            ));
            assert!(matches!(
                UserName::new("ops admin"),
                Err(UserNameError::InvalidCharacter { char: ' ', .. })
            ));
        }

        #[test]
        fn test_edges_and_dots() {
            assert_eq!(
                UserName::new(".admin").unwrap_err(),
                UserNameError::InvalidStart { char: '.' }
            );
            assert_eq!(
                UserName::new("admin-").unwrap_err(),
                UserNameError::InvalidEnd { char: '-' }
            );
            assert_eq!(
                UserName::new("ops..admin").unwrap_err(),
                UserNameError::ConsecutiveDots
            );
            assert!(UserName::new("_ops_").is_ok());
        }
    }

    #[test]
    fn test_serde() {
        let name: UserName = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(name.as_str(), "admin");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"admin\"");
        assert!(serde_json::from_str::<UserName>("\"ab\"").is_err());
    }
}
