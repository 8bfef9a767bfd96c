//! User Password Value Object
//!
//! Domain wrappers over `platform::password`.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("Correct-Horse-9".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&RawPassword::for_login("Correct-Horse-9".to_string()), None));
//! ```

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError, verify_dummy};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// A newly chosen password; policy violations become `BadRequest`.
    pub fn new(raw: String) -> AuthResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|e: PasswordPolicyError| AuthError::BadRequest(e.to_string()))
    }

    /// A password submitted at login. Never rejected here.
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    /// Burn one Argon2 verification with no stored digest; always `false`.
    pub fn verify_against_nothing(&self) -> bool {
        verify_dummy(&self.0)
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Stored Password
// ============================================================================

/// Argon2id digest kept on the user record
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        Ok(Self(raw.0.hash(pepper)?))
    }

    /// Load a stored PHC string. A corrupt digest loads fine and never verifies.
    pub fn from_db(phc: String) -> Self {
        Self(HashedPassword::from_stored(phc))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_error_is_bad_request() {
        let err = RawPassword::new("short".to_string()).unwrap_err();
        assert!(matches!(err, AuthError::BadRequest(msg) if msg.contains("at least 8")));
    }

    #[test]
    fn test_login_input_never_rejected() {
        let raw = RawPassword::for_login(String::new());
        assert!(!raw.verify_against_nothing());
    }

    #[test]
    fn test_round_trip_through_storage() {
        let raw = RawPassword::new("Correct-Horse-9".to_string()).unwrap();
        let stored = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();
        let loaded = UserPassword::from_db(stored.as_phc_string().to_string());

        assert!(loaded.verify(
            &RawPassword::for_login("Correct-Horse-9".to_string()),
            Some(b"pepper")
        ));
        assert!(!loaded.verify(
            &RawPassword::for_login("Correct-Horse-0".to_string()),
            Some(b"pepper")
        ));
    }

    #[test]
    fn test_corrupt_digest_fails_verification() {
        let loaded = UserPassword::from_db("plaintext".to_string());
        assert!(!loaded.verify(&RawPassword::for_login("plaintext".to_string()), None));
    }
}
