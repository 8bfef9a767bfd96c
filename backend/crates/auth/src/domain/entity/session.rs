//! Session Entity
//!
//! Server-side record behind every access token. A token is only as good
//! as its session: logout flips `is_active` and the token stops working.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{SessionId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    /// Only ever goes true → false
    pub is_active: bool,
    /// Absolute; never extended
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(
        user_id: UserId,
        ip_address: Option<String>,
        user_agent: Option<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::new(),
            user_id,
            ip_address,
            user_agent,
            is_active: true,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Active and not yet expired
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired_at(now)
    }

    pub fn is_live(&self) -> bool {
        self.is_live_at(Utc::now())
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_live() {
        let session = Session::new(UserId::new(), None, None, Duration::hours(24));
        assert!(session.is_live());
        assert_eq!(session.expires_at - session.created_at, Duration::hours(24));
    }

    #[test]
    fn test_expiry_boundary() {
        let session = Session::new(UserId::new(), None, None, Duration::minutes(1));
        assert!(session.is_live_at(session.expires_at - Duration::seconds(1)));
        assert!(!session.is_live_at(session.expires_at));
    }

    #[test]
    fn test_deactivated_is_not_live() {
        let mut session = Session::new(UserId::new(), None, None, Duration::hours(1));
        session.deactivate();
        assert!(!session.is_live());
    }
}
