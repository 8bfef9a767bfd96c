//! HTTP Handlers

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use std::net::SocketAddr;
use std::sync::Arc;

use platform::client::ClientInfo;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginAdminInput, LoginAdminUseCase, LoginUseCase, MeUseCase, RegisterInput, RegisterUseCase,
    SignOutUseCase, VerifyPhoneInput, VerifyPhoneUseCase,
};
use crate::domain::entity::claims::Claims;
use crate::domain::repository::{EphemeralStore, SessionRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    HealthResponse, LoginAdminRequest, LoginRequest, MessageResponse, RegisterRequest,
    UserResponse, VerifyPhoneRequest,
};
use crate::presentation::extract::AppJson;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, K>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    K: EphemeralStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub codes: Arc<K>,
    pub config: Arc<AuthConfig>,
}

/// Peer address is only present when served with connect info
type Peer = Option<Extension<ConnectInfo<SocketAddr>>>;

fn client_info(headers: &HeaderMap, peer: Peer) -> ClientInfo {
    let direct_ip = peer.map(|Extension(ConnectInfo(addr))| addr.ip());
    ClientInfo::from_headers(headers, direct_ip)
}

// ============================================================================
// Admin Login
// ============================================================================

/// POST /v1/auth/login-admin
pub async fn login_admin<R, K>(
    State(state): State<AuthAppState<R, K>>,
    headers: HeaderMap,
    peer: Peer,
    AppJson(req): AppJson<LoginAdminRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    K: EphemeralStore + Clone + Send + Sync + 'static,
{
    let use_case =
        LoginAdminUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = LoginAdminInput {
        username: req.username,
        password: req.password,
    };

    let output = use_case.execute(input, client_info(&headers, peer)).await?;

    Ok(Json(output.into()))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /v1/auth/logout
pub async fn logout<R, K>(
    State(state): State<AuthAppState<R, K>>,
    claims: Option<Extension<Claims>>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    K: EphemeralStore + Clone + Send + Sync + 'static,
{
    let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
    let message = use_case.execute(claims.as_ref().map(|c| &c.0)).await?;

    Ok(Json(MessageResponse::new(message)))
}

// ============================================================================
// Phone Registration
// ============================================================================

/// POST /v1/auth/register
pub async fn register<R, K>(
    State(state): State<AuthAppState<R, K>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<MessageResponse>)>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    K: EphemeralStore + Clone + Send + Sync + 'static,
{
    let use_case =
        RegisterUseCase::new(state.repo.clone(), state.codes.clone(), state.config.clone());

    let input = RegisterInput {
        full_name: req.full_name,
        phone_number: req.phone_number,
    };

    let message = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new(message))))
}

/// POST /v1/auth/verify-phone
pub async fn verify_phone<R, K>(
    State(state): State<AuthAppState<R, K>>,
    headers: HeaderMap,
    peer: Peer,
    AppJson(req): AppJson<VerifyPhoneRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    K: EphemeralStore + Clone + Send + Sync + 'static,
{
    let use_case = VerifyPhoneUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.codes.clone(),
        state.config.clone(),
    );

    let input = VerifyPhoneInput {
        phone_number: req.phone_number,
        otp: req.otp,
    };

    let output = use_case.execute(input, client_info(&headers, peer)).await?;

    Ok(Json(output.into()))
}

/// POST /v1/auth/login
pub async fn login<R, K>(
    State(state): State<AuthAppState<R, K>>,
    AppJson(req): AppJson<LoginRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    K: EphemeralStore + Clone + Send + Sync + 'static,
{
    let use_case =
        LoginUseCase::new(state.repo.clone(), state.codes.clone(), state.config.clone());
    let message = use_case.execute(&req.phone_number).await?;

    Ok(Json(MessageResponse::new(message)))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /v1/auth/me
pub async fn me<R, K>(
    State(state): State<AuthAppState<R, K>>,
    claims: Option<Extension<Claims>>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    K: EphemeralStore + Clone + Send + Sync + 'static,
{
    let use_case = MeUseCase::new(state.repo.clone());
    let user = use_case.execute(claims.as_ref().map(|c| &c.0)).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
