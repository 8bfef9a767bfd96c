//! Register Use Case
//!
//! Phone sign-up for clients. Creates (or refreshes) an unverified account
//! and sends it a one-time code.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::one_time_code::OneTimeCodeStore;
use crate::domain::entity::user::User;
use crate::domain::repository::{EphemeralStore, UserRepository};
use crate::domain::value_object::{
    full_name::FullName, phone_number::PhoneNumber, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

pub const REGISTER_MESSAGE: &str =
    "User registered successfully, please verify your phone number";

/// Register input
pub struct RegisterInput {
    pub full_name: String,
    pub phone_number: String,
}

/// Register use case
pub struct RegisterUseCase<U, K>
where
    U: UserRepository,
    K: EphemeralStore,
{
    user_repo: Arc<U>,
    codes: OneTimeCodeStore<K>,
}

impl<U, K> RegisterUseCase<U, K>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<&'static str> {
        let full_name =
            FullName::new(&input.full_name).map_err(|e| AuthError::BadRequest(e.to_string()))?;
        let phone = PhoneNumber::new(&input.phone_number)
            .map_err(|e| AuthError::BadRequest(e.to_string()))?;

        let existing = self
            .user_repo
            .find_by_phone_and_role(&phone, UserRole::Client)
            .await?;

        match existing {
            Some(user) if user.is_active() => return Err(AuthError::Conflict),
            Some(mut user) => {
                user.set_full_name(full_name);
                self.user_repo.update(&user).await?;
                tracing::info!(user_id = %user.user_id, "Pending registration refreshed");
            }
            None => {
                let user = User::new_client(full_name, phone.clone());
                self.user_repo.create(&user).await?;
                tracing::info!(user_id = %user.user_id, "Client registered");
            }
        }

        self.codes.issue(&phone).await?;
        Ok(REGISTER_MESSAGE)
    }
}
