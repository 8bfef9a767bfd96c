//! Provision Admin Use Case
//!
//! Seeds a password account at startup. Phone sign-up only ever creates
//! clients, so this is how the first admin comes to exist.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    full_name::FullName, user_name::UserName, user_password::RawPassword,
    user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

pub struct ProvisionAdminInput {
    pub username: String,
    pub password: String,
    pub role: UserRole,
}

/// What provisioning did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    Created,
    AlreadyExists,
}

pub struct ProvisionAdminUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ProvisionAdminUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Create the account unless the user name is taken; never overwrites.
    pub async fn execute(&self, input: ProvisionAdminInput) -> AuthResult<Provisioned> {
        if !input.role.is_admin_or_higher() {
            return Err(AuthError::BadRequest(
                "Only admin roles can be provisioned".into(),
            ));
        }

        let user_name =
            UserName::new(&input.username).map_err(|e| AuthError::BadRequest(e.to_string()))?;

        if self.user_repo.find_by_user_name(&user_name).await?.is_some() {
            tracing::info!(username = %user_name, "Admin account already present");
            return Ok(Provisioned::AlreadyExists);
        }

        let raw = RawPassword::new(input.password)?;
        let password = UserPassword::from_raw(&raw, self.config.pepper())?;

        let full_name = FullName::new(user_name.as_str())
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let mut user = User::new_admin(full_name, user_name, password);
        user.user_role = input.role;

        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.user_role,
            "Admin account provisioned"
        );
        Ok(Provisioned::Created)
    }
}
