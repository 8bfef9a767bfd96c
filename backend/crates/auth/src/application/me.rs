//! Current User Use Case

use std::sync::Arc;

use crate::domain::entity::{claims::Claims, user::User};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct MeUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> MeUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, claims: Option<&Claims>) -> AuthResult<User> {
        let claims = claims.ok_or(AuthError::Unauthorized)?;

        self.user_repo
            .find_by_id(&claims.sub)
            .await?
            .ok_or(AuthError::NotFound)
    }
}
