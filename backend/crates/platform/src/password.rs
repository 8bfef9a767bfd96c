//! Password Hashing and Verification
//!
//! Argon2id (OWASP parameters: m=19456, t=2, p=1) with a random 128-bit salt
//! and an optional application pepper. Digests are PHC strings, so the
//! algorithm, parameters and salt travel with the hash.
//!
//! Clear-text passwords are NFKC-normalised, zeroized on drop and never
//! printed by `Debug`.

use std::fmt;
use std::sync::OnceLock;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Minimum password length (NIST SP 800-63B: at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Policy violations for a newly chosen password
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Salt generation or hashing failed; not user-facing
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Clear Text Password
// ============================================================================

/// Clear text password, zeroized on drop. Deliberately not `Clone`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Accept a newly chosen password, enforcing the length and character policy.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let candidate = Self::for_verification(raw);
        let normalized = candidate.0.as_str();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // Code points, not bytes
        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(candidate)
    }

    /// Wrap a submitted password for verification only.
    ///
    /// No policy is applied: a login attempt must fail through the hash
    /// comparison, never through a distinguishable validation error.
    pub fn for_verification(raw: String) -> Self {
        let raw = Zeroizing::new(raw);
        Self(raw.nfkc().collect())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut combined = Zeroizing::new(self.as_bytes().to_vec());
        if let Some(p) = pepper {
            combined.extend_from_slice(p);
        }
        combined
    }

    /// Hash with Argon2id and a fresh random salt.
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);

        let hash = Argon2::default()
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password
// ============================================================================

/// Argon2id digest in PHC string format; safe to store.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a digest read back from storage.
    ///
    /// Not parsed here: a corrupt digest only ever fails verification.
    pub fn from_stored(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Constant-time verification. A malformed digest yields `false`.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        verify_phc(&self.hash, password, pepper)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

/// Verify against a raw PHC string; never errors.
pub fn verify_phc(phc: &str, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
    let Ok(parsed) = PasswordHash::new(phc) else {
        return false;
    };

    Argon2::default()
        .verify_password(&password.peppered(pepper), &parsed)
        .is_ok()
}

/// Burn one verification against a fixed digest.
///
/// Called when there is no stored digest to compare with (unknown account)
/// so that path costs about as much as a real mismatch. Always `false`.
pub fn verify_dummy(password: &ClearTextPassword) -> bool {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();

    let dummy = DUMMY.get_or_init(|| {
        ClearTextPassword::for_verification("dummy-password-for-timing".to_string())
            .hash(None)
            .ok()
            .map(|h| h.hash)
    });

    if let Some(phc) = dummy {
        let _ = verify_phc(phc, password, None);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pw(s: &str) -> ClearTextPassword {
        ClearTextPassword::for_verification(s.to_string())
    }

    #[test]
    fn test_policy_rejects_short_and_long() {
        assert!(matches!(
            ClearTextPassword::new("short".to_string()),
            Err(PasswordPolicyError::TooShort { min: 8, actual: 5 })
        ));
        assert!(matches!(
            ClearTextPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1)),
            Err(PasswordPolicyError::TooLong { .. })
        ));
    }

    #[test]
    fn test_policy_rejects_blank_and_control() {
        assert_eq!(
            ClearTextPassword::new("          ".to_string()).unwrap_err(),
            PasswordPolicyError::EmptyOrWhitespace
        );
        assert_eq!(
            ClearTextPassword::new("abc\u{0007}defgh".to_string()).unwrap_err(),
            PasswordPolicyError::InvalidCharacter
        );
    }

    #[test]
    fn test_policy_counts_code_points() {
        // 8 code points, 24 bytes
        assert!(ClearTextPassword::new("パスワード安全だ".to_string()).is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let hashed = pw("Correct-Horse-9").hash(None).unwrap();
        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hashed.verify(&pw("Correct-Horse-9"), None));
        assert!(!hashed.verify(&pw("Correct-Horse-8"), None));
    }

    #[test]
    fn test_salt_makes_digests_differ() {
        let a = pw("Correct-Horse-9").hash(None).unwrap();
        let b = pw("Correct-Horse-9").hash(None).unwrap();
        assert_ne!(a.as_phc_string(), b.as_phc_string());
    }

    #[test]
    fn test_pepper_must_match() {
        let pepper = b"gateway-pepper";
        let hashed = pw("Correct-Horse-9").hash(Some(pepper)).unwrap();
        assert!(hashed.verify(&pw("Correct-Horse-9"), Some(pepper)));
        assert!(!hashed.verify(&pw("Correct-Horse-9"), None));
        assert!(!hashed.verify(&pw("Correct-Horse-9"), Some(b"other")));
    }

    #[test]
    fn test_malformed_digest_is_false_not_error() {
        assert!(!verify_phc("not-a-phc-string", &pw("whatever"), None));
        assert!(!verify_phc("", &pw(""), None));
    }

    #[test]
    fn test_corrupt_stored_digest_never_verifies() {
        let stored = HashedPassword::from_stored("argon2id-no-leading-dollar");
        assert!(!stored.verify(&pw("whatever"), None));

        let bad_version =
            HashedPassword::from_stored("$argon2id$v=abc$m=19456,t=2,p=1$c2FsdA$aGFzaA");
        assert!(!bad_version.verify(&pw("whatever"), None));
    }

    #[test]
    fn test_stored_digest_round_trip() {
        let hashed = pw("Correct-Horse-9").hash(None).unwrap();
        let loaded = HashedPassword::from_stored(hashed.as_phc_string());
        assert!(loaded.verify(&pw("Correct-Horse-9"), None));
    }

    #[test]
    fn test_nfkc_normalisation_on_verify() {
        // Full-width digits normalise to ASCII
        let hashed = pw("secret123").hash(None).unwrap();
        assert!(hashed.verify(&pw("secret１２３"), None));
    }

    #[test]
    fn test_verify_dummy_is_always_false() {
        assert!(!verify_dummy(&pw("dummy-password-for-timing")));
    }

    #[test]
    fn test_debug_redaction() {
        let debug = format!("{:?}", pw("hunter2-secret"));
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("hunter2"));
    }
}
