//! User Status Value Object
//!
//! Two states only. `InVerify` until the phone number is confirmed with a
//! one-time code, then `Active`. There is no way back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Registered, phone not yet confirmed
    #[default]
    InVerify,

    /// Phone confirmed (or provisioned account); terminal
    Active,
}

impl UserStatus {
    /// Get string code for storage/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InVerify => "in_verify",
            Self::Active => "active",
        }
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "in_verify" => Some(Self::InVerify),
            "active" => Some(Self::Active),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
