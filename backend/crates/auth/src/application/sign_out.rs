//! Sign Out Use Case
//!
//! Invalidates the session named by the caller's verified claims.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::SessionManager;
use crate::domain::entity::claims::Claims;
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

pub const SIGN_OUT_MESSAGE: &str = "Successfully logged out";

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    sessions: SessionManager<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            sessions: SessionManager::new(session_repo, config),
        }
    }

    /// `claims` is what the gate attached; `None` means no session to end
    pub async fn execute(&self, claims: Option<&Claims>) -> AuthResult<&'static str> {
        let claims = claims.ok_or_else(|| AuthError::BadRequest("Invalid session ID".into()))?;

        self.sessions.invalidate(&claims.sid).await?;

        tracing::info!(
            user_id = %claims.sub,
            session_id = %claims.sid,
            "User signed out"
        );
        Ok(SIGN_OUT_MESSAGE)
    }
}
