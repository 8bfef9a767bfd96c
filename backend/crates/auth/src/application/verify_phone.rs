//! Verify Phone Use Case
//!
//! Completes both registration and client login: check the code, activate
//! the account if needed, open a session, and only then burn the code.

use std::sync::Arc;

use platform::client::ClientInfo;

use crate::application::config::AuthConfig;
use crate::application::issue_credential::{AuthenticatedUser, CredentialIssuer};
use crate::application::one_time_code::OneTimeCodeStore;
use crate::domain::repository::{EphemeralStore, SessionRepository, UserRepository};
use crate::domain::value_object::{phone_number::PhoneNumber, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

pub struct VerifyPhoneInput {
    pub phone_number: String,
    pub otp: String,
}

pub struct VerifyPhoneUseCase<U, S, K>
where
    U: UserRepository,
    S: SessionRepository,
    K: EphemeralStore,
{
    user_repo: Arc<U>,
    codes: OneTimeCodeStore<K>,
    issuer: CredentialIssuer<S>,
}

impl<U, S, K> VerifyPhoneUseCase<U, S, K>
where
    U: UserRepository,
    S: SessionRepository,
    K: EphemeralStore,
{
    pub fn new(
        user_repo: Arc<U>,
        session_repo: Arc<S>,
        code_store: Arc<K>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            codes: OneTimeCodeStore::new(code_store, config.clone()),
            issuer: CredentialIssuer::new(session_repo, config),
        }
    }

    pub async fn execute(
        &self,
        input: VerifyPhoneInput,
        client: ClientInfo,
    ) -> AuthResult<AuthenticatedUser> {
        let phone = PhoneNumber::new(&input.phone_number)
            .map_err(|e| AuthError::BadRequest(e.to_string()))?;

        if !self.codes.verify(&phone, input.otp.trim()).await? {
            return Err(AuthError::InvalidOtp);
        }

        // Same answer as a wrong code: no hint whether the phone is known
        let mut user = self
            .user_repo
            .find_by_phone_and_role(&phone, UserRole::Client)
            .await?
            .ok_or(AuthError::InvalidOtp)?;

        if user.activate() {
            self.user_repo.update(&user).await?;
            tracing::info!(user_id = %user.user_id, "Phone verified, account activated");
        }

        let authenticated = self.issuer.issue(user, &client).await?;

        self.codes.invalidate(&phone).await?;

        tracing::info!(
            user_id = %authenticated.user.user_id,
            session_id = %authenticated.session.session_id,
            "Client signed in"
        );
        Ok(authenticated)
    }
}
