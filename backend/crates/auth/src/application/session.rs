//! Session Manager
//!
//! Creates, fetches and invalidates the server-side records behind access
//! tokens.

use std::sync::Arc;

use platform::client::ClientInfo;

use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{SessionId, UserId};
use crate::error::{AuthError, AuthResult};

pub struct SessionManager<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SessionManager<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Open an active session expiring one token lifetime from now
    pub async fn create(&self, user_id: UserId, client: &ClientInfo) -> AuthResult<Session> {
        let session = Session::new(
            user_id,
            client.ip_string(),
            client.user_agent.clone(),
            self.config.token_ttl_chrono(),
        );

        self.session_repo.create(&session).await?;

        tracing::debug!(
            user_id = %session.user_id,
            session_id = %session.session_id,
            "Session created"
        );
        Ok(session)
    }

    /// `NotFound` if there is no such session
    pub async fn get(&self, session_id: &SessionId) -> AuthResult<Session> {
        self.session_repo
            .find_by_id(session_id)
            .await?
            .ok_or(AuthError::NotFound)
    }

    /// Mark inactive; idempotent
    pub async fn invalidate(&self, session_id: &SessionId) -> AuthResult<()> {
        self.session_repo.deactivate(session_id).await
    }

    /// Startup housekeeping. Failures are logged, not returned.
    pub async fn cleanup_expired(&self) -> u64 {
        match self.session_repo.cleanup_expired().await {
            Ok(deleted) => {
                tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");
                deleted
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to clean up expired sessions");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryAuthRepository;
    use std::time::Duration;

    fn manager(ttl: Duration) -> SessionManager<InMemoryAuthRepository> {
        SessionManager::new(
            Arc::new(InMemoryAuthRepository::new()),
            Arc::new(AuthConfig {
                token_ttl: ttl,
                ..Default::default()
            }),
        )
    }

    fn client() -> ClientInfo {
        ClientInfo {
            ip: Some("10.0.0.1".parse().unwrap()),
            user_agent: Some("okhttp/4.12".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let manager = manager(Duration::from_secs(3600));
        let user_id = UserId::new();
        let session = manager.create(user_id, &client()).await.unwrap();

        let loaded = manager.get(&session.session_id).await.unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.user_id, user_id);
        assert_eq!(loaded.ip_address.as_deref(), Some("10.0.0.1"));
        assert!(loaded.is_live());
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let manager = manager(Duration::from_secs(3600));
        assert!(matches!(
            manager.get(&SessionId::new()).await,
            Err(AuthError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_invalidate_is_idempotent() {
        let manager = manager(Duration::from_secs(3600));
        let session = manager.create(UserId::new(), &client()).await.unwrap();

        manager.invalidate(&session.session_id).await.unwrap();
        manager.invalidate(&session.session_id).await.unwrap();
        manager.invalidate(&SessionId::new()).await.unwrap();

        let loaded = manager.get(&session.session_id).await.unwrap();
        assert!(!loaded.is_active);
        assert!(!loaded.is_live());
    }

    #[tokio::test]
    async fn test_cleanup_removes_only_expired() {
        let manager = manager(Duration::from_millis(10));
        let expired = manager.create(UserId::new(), &client()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        let fresh = SessionManager::new(
            manager.session_repo.clone(),
            Arc::new(AuthConfig::default()),
        );
        let live = fresh.create(UserId::new(), &client()).await.unwrap();

        assert_eq!(manager.cleanup_expired().await, 1);
        assert!(manager.get(&expired.session_id).await.is_err());
        assert!(manager.get(&live.session_id).await.is_ok());
    }
}
