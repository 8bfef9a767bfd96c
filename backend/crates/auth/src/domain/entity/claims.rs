//! Access Token Claims

use serde::{Deserialize, Serialize};

use crate::domain::value_object::{SessionId, UserId, user_role::UserRole};

/// Claim set carried inside an access token.
///
/// Timestamps are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: UserId,
    pub role: UserRole,
    pub sid: SessionId,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(sub: UserId, role: UserRole, sid: SessionId, iat: i64, exp: i64) -> Self {
        Self {
            sub,
            role,
            sid,
            iat,
            exp,
        }
    }

    /// Expired once `now` reaches `exp`
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// Request headers the gate sets from verified claims
pub mod headers {
    pub const USER_ID: &str = "x-user-id";
    pub const USER_ROLE: &str = "x-user-role";
    pub const SESSION_ID: &str = "x-session-id";
}

impl Claims {
    /// Fixed (name, value) list propagated to downstream handlers
    pub fn header_pairs(&self) -> [(&'static str, String); 3] {
        [
            (headers::USER_ID, self.sub.to_string()),
            (headers::USER_ROLE, self.role.code().to_string()),
            (headers::SESSION_ID, self.sid.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let claims = Claims::new(UserId::new(), UserRole::Admin, SessionId::new(), 100, 200);
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["role"], "admin");
        assert_eq!(value["sub"], claims.sub.to_string());
        assert_eq!(value["sid"], claims.sid.to_string());
        assert_eq!(value["exp"], 200);
    }

    #[test]
    fn test_expiry_is_inclusive() {
        let claims = Claims::new(UserId::new(), UserRole::Client, SessionId::new(), 0, 10);
        assert!(!claims.is_expired_at(9));
        assert!(claims.is_expired_at(10));
    }

    #[test]
    fn test_header_pairs() {
        let claims = Claims::new(UserId::new(), UserRole::Client, SessionId::new(), 0, 10);
        let pairs = claims.header_pairs();
        assert_eq!(pairs[0], ("x-user-id", claims.sub.to_string()));
        assert_eq!(pairs[1], ("x-user-role", "client".to_string()));
        assert_eq!(pairs[2], ("x-session-id", claims.sid.to_string()));
    }
}
