//! In-Memory Implementations
//!
//! For development without a database, and for tests. State lives for the
//! life of the process. Uniqueness rules match the PostgreSQL schema.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{EphemeralStore, SessionRepository, UserRepository};
use crate::domain::value_object::{
    SessionId, UserId, phone_number::PhoneNumber, user_name::UserName, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Users and sessions behind `RwLock`s
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn collides(a: &User, b: &User) -> bool {
    let same_phone = a.phone_number.is_some()
        && a.phone_number == b.phone_number
        && a.user_role == b.user_role;
    let same_name = a.user_name.is_some() && a.user_name == b.user_name;
    same_phone || same_name
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.user_id) || users.values().any(|u| collides(u, user)) {
            return Err(AuthError::Conflict);
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_phone_and_role(
        &self,
        phone: &PhoneNumber,
        role: UserRole,
    ) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.user_role == role && u.phone_number.as_ref() == Some(phone))
            .cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.user_name.as_ref() == Some(user_name))
            .cloned())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.user_id != user.user_id && collides(u, user))
        {
            return Err(AuthError::Conflict);
        }

        match users.get_mut(&user.user_id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(())
            }
            None => Err(AuthError::NotFound),
        }
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: &SessionId) -> AuthResult<Option<Session>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn deactivate(&self, session_id: &SessionId) -> AuthResult<()> {
        if let Some(session) = self.sessions.write().await.get_mut(session_id) {
            session.deactivate();
        }
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}

// ============================================================================
// Ephemeral Store
// ============================================================================

/// Key/value entries with a deadline; expired entries read as absent and
/// are dropped on the next write.
#[derive(Clone, Default)]
pub struct InMemoryEphemeralStore {
    entries: Arc<RwLock<HashMap<String, (String, Instant)>>>,
}

impl InMemoryEphemeralStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live entries
    pub async fn live_entries(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|(_, deadline)| *deadline > now)
            .count()
    }
}

impl EphemeralStore for InMemoryEphemeralStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AuthResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, (_, deadline)| *deadline > now);
        entries.insert(key.to_string(), (value.to_string(), now + ttl));
        Ok(())
    }

    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|(_, deadline)| *deadline > Instant::now())
            .map(|(value, _)| value.clone()))
    }

    async fn delete(&self, key: &str) -> AuthResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
