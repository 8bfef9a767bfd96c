//! Gateway Router

use axum::{
    Router,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;

use crate::application::PolicyGate;
use crate::application::config::AuthConfig;
use crate::domain::policy::PolicyEnforcer;
use crate::domain::repository::{EphemeralStore, SessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::policy_gate;

/// Gateway router on PostgreSQL; one repository serves all three stores
pub fn auth_router<P>(repo: PgAuthRepository, policy: P, config: AuthConfig) -> Router
where
    P: PolicyEnforcer + Send + Sync + 'static,
{
    auth_router_generic(repo.clone(), repo, policy, config)
}

/// Gateway router for any repository implementation
///
/// Every route, `/health` included, sits behind the policy gate. Unknown
/// paths fall through to a plain 404.
pub fn auth_router_generic<R, K, P>(repo: R, codes: K, policy: P, config: AuthConfig) -> Router
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    K: EphemeralStore + Clone + Send + Sync + 'static,
    P: PolicyEnforcer + Send + Sync + 'static,
{
    let repo = Arc::new(repo);
    let config = Arc::new(config);

    let gate = PolicyGate::new(repo.clone(), Arc::new(policy), config.clone());

    let timeout =
        TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, config.request_timeout);

    let state = AuthAppState {
        repo,
        codes: Arc::new(codes),
        config,
    };

    let auth = Router::new()
        .route("/login-admin", post(handlers::login_admin::<R, K>))
        .route("/logout", post(handlers::logout::<R, K>))
        .route("/register", post(handlers::register::<R, K>))
        .route("/verify-phone", post(handlers::verify_phone::<R, K>))
        .route("/login", post(handlers::login::<R, K>))
        .route("/me", get(handlers::me::<R, K>))
        .with_state(state);

    Router::new()
        .nest("/v1/auth", auth)
        .route("/health", get(handlers::health))
        .route_layer(middleware::from_fn_with_state(gate, policy_gate::<R, P>))
        .layer(timeout)
}
