//! Open a session and sign a token for it.
//!
//! The last step of every successful login, whatever the first factor was.

use std::sync::Arc;

use platform::client::ClientInfo;

use crate::application::config::AuthConfig;
use crate::application::session::SessionManager;
use crate::application::token::TokenCodec;
use crate::domain::entity::{claims::Claims, session::Session, user::User};
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// A logged-in user and their fresh credential
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub session: Session,
    pub access_token: String,
}

pub struct CredentialIssuer<S>
where
    S: SessionRepository,
{
    sessions: SessionManager<S>,
    tokens: TokenCodec,
}

impl<S> CredentialIssuer<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            sessions: SessionManager::new(session_repo, config.clone()),
            tokens: TokenCodec::new(config),
        }
    }

    pub async fn issue(&self, user: User, client: &ClientInfo) -> AuthResult<AuthenticatedUser> {
        let session = self.sessions.create(user.user_id, client).await?;

        let claims = Claims::new(
            user.user_id,
            user.user_role,
            session.session_id,
            session.created_at.timestamp(),
            session.expires_at.timestamp(),
        );
        let access_token = self.tokens.issue(&claims)?;

        Ok(AuthenticatedUser {
            user,
            session,
            access_token,
        })
    }
}
