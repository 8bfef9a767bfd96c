//! Policy Gate
//!
//! The per-request decision, without any HTTP framework attached:
//!
//! 1. No bearer token, or a token that fails to parse → subject `unauthorized`
//! 2. Valid token → subject is the role; the named session must be live
//! 3. The oracle decides `(subject, resource, action)`
//!
//! `Ok` means forward (with the verified claims, if any). `Err` means reject.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::domain::entity::claims::Claims;
use crate::domain::policy::PolicyEnforcer;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::user_role::UNAUTHORIZED_SUBJECT;
use crate::error::{AuthError, AuthResult};

pub struct PolicyGate<S, P>
where
    S: SessionRepository,
    P: PolicyEnforcer,
{
    session_repo: Arc<S>,
    policy: Arc<P>,
    tokens: TokenCodec,
}

impl<S, P> Clone for PolicyGate<S, P>
where
    S: SessionRepository,
    P: PolicyEnforcer,
{
    fn clone(&self) -> Self {
        Self {
            session_repo: self.session_repo.clone(),
            policy: self.policy.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

impl<S, P> PolicyGate<S, P>
where
    S: SessionRepository,
    P: PolicyEnforcer,
{
    pub fn new(session_repo: Arc<S>, policy: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            policy,
            tokens: TokenCodec::new(config),
        }
    }

    /// Decide one request. `bearer` is the raw token, if the caller sent one.
    pub async fn authorize(
        &self,
        bearer: Option<&str>,
        resource: &str,
        action: &str,
    ) -> AuthResult<Option<Claims>> {
        let claims = match bearer.map(|token| self.tokens.parse(token)) {
            None => None,
            Some(Ok(claims)) => Some(claims),
            Some(Err(e)) => {
                tracing::debug!(error = %e, "Bearer token rejected; treating caller as anonymous");
                None
            }
        };

        if let Some(claims) = &claims {
            self.check_session(claims).await?;
        }

        let subject = claims
            .as_ref()
            .map_or(UNAUTHORIZED_SUBJECT, |c| c.role.code());

        match self.policy.enforce(subject, resource, action).await {
            Ok(true) => Ok(claims),
            Ok(false) => {
                tracing::debug!(subject, resource, action, "Denied by policy");
                Err(AuthError::Forbidden)
            }
            Err(e) => {
                tracing::error!(error = %e, subject, resource, action, "Policy oracle failed");
                Err(AuthError::Forbidden)
            }
        }
    }

    async fn check_session(&self, claims: &Claims) -> AuthResult<()> {
        let session = self
            .session_repo
            .find_by_id(&claims.sid)
            .await
            .map_err(|e| match e {
                AuthError::Database(_) | AuthError::Internal(_) => e,
                other => AuthError::Internal(other.to_string()),
            })?;

        match session {
            Some(session) if session.is_live_at(Utc::now()) && session.user_id == claims.sub => {
                Ok(())
            }
            _ => {
                tracing::debug!(session_id = %claims.sid, "Session missing, inactive or expired");
                Err(AuthError::Unauthorized)
            }
        }
    }
}
