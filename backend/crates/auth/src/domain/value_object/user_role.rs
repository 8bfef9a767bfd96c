use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy subject for callers without a valid token
pub const UNAUTHORIZED_SUBJECT: &str = "unauthorized";

/// User type tag. Doubles as the policy subject for authenticated callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Phone-registered end user
    #[default]
    Client,
    Admin,
    SuperAdmin,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Client => "client",
            Admin => "admin",
            SuperAdmin => "super_admin",
        }
    }

    #[inline]
    pub const fn is_admin_or_higher(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::SuperAdmin)
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code {
            "client" => Some(Client),
            "admin" => Some(Admin),
            "super_admin" => Some(SuperAdmin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
