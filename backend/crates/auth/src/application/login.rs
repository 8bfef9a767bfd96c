//! Client Login Use Case
//!
//! Passwordless: sends a code to a known phone. The caller finishes with
//! verify-phone.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::one_time_code::OneTimeCodeStore;
use crate::domain::repository::{EphemeralStore, UserRepository};
use crate::domain::value_object::{phone_number::PhoneNumber, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

pub const LOGIN_MESSAGE: &str = "Verification code sent";

pub struct LoginUseCase<U, K>
where
    U: UserRepository,
    K: EphemeralStore,
{
    user_repo: Arc<U>,
    codes: OneTimeCodeStore<K>,
}

impl<U, K> LoginUseCase<U, K>
where
    U: UserRepository,
    K: EphemeralStore,
{
    pub fn new(user_repo: Arc<U>, code_store: Arc<K>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            codes: OneTimeCodeStore::new(code_store, config),
        }
    }

    pub async fn execute(&self, phone_number: &str) -> AuthResult<&'static str> {
        let phone =
            PhoneNumber::new(phone_number).map_err(|e| AuthError::BadRequest(e.to_string()))?;

        let user = self
            .user_repo
            .find_by_phone_and_role(&phone, UserRole::Client)
            .await?
            .ok_or(AuthError::NotFound)?;

        self.codes.issue(&phone).await?;

        tracing::info!(user_id = %user.user_id, "Login code issued");
        Ok(LOGIN_MESSAGE)
    }
}
