//! Admin Login Use Case
//!
//! Username and password. Every failure is the same `InvalidCredentials`,
//! and an unknown user still pays for one Argon2 verification.

use std::sync::Arc;

use platform::client::ClientInfo;

use crate::application::config::AuthConfig;
use crate::application::issue_credential::{AuthenticatedUser, CredentialIssuer};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginAdminInput {
    pub username: String,
    pub password: String,
}

/// Admin login use case
pub struct LoginAdminUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    issuer: CredentialIssuer<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> LoginAdminUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            issuer: CredentialIssuer::new(session_repo, config.clone()),
            config,
        }
    }

    pub async fn execute(
        &self,
        input: LoginAdminInput,
        client: ClientInfo,
    ) -> AuthResult<AuthenticatedUser> {
        let raw_password = RawPassword::for_login(input.password);

        // A name that cannot exist is looked up as "nobody"
        let user = match UserName::new(&input.username) {
            Ok(user_name) => self.user_repo.find_by_user_name(&user_name).await?,
            Err(_) => None,
        };

        let verified = match user.as_ref().and_then(|u| u.password.as_ref()) {
            Some(hash) => hash.verify(&raw_password, self.config.pepper()),
            None => raw_password.verify_against_nothing(),
        };

        let user = match user {
            Some(user) if verified => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let authenticated = self.issuer.issue(user, &client).await?;

        tracing::info!(
            user_id = %authenticated.user.user_id,
            session_id = %authenticated.session.session_id,
            role = %authenticated.user.user_role,
            "Admin signed in"
        );
        Ok(authenticated)
    }
}
