//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use std::time::Duration;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::value_object::{
    SessionId, UserId, phone_number::PhoneNumber, user_name::UserName, user_role::UserRole,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user; a unique-key collision surfaces as `Conflict`
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_phone_and_role(
        &self,
        phone: &PhoneNumber,
        role: UserRole,
    ) -> AuthResult<Option<User>>;

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Update user
    async fn update(&self, user: &User) -> AuthResult<()>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &Session) -> AuthResult<()>;

    async fn find_by_id(&self, session_id: &SessionId) -> AuthResult<Option<Session>>;

    /// Set `is_active = false`. Unknown ids are not an error.
    async fn deactivate(&self, session_id: &SessionId) -> AuthResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

/// Short-lived key/value storage (one-time codes)
#[trait_variant::make(EphemeralStore: Send)]
pub trait LocalEphemeralStore {
    /// Store `value` under `key` for `ttl`, replacing any existing entry
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AuthResult<()>;

    /// `None` when absent or expired
    async fn get(&self, key: &str) -> AuthResult<Option<String>>;

    /// Idempotent
    async fn delete(&self, key: &str) -> AuthResult<()>;
}
