//! Gateway Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors render through the
//! auth crate.

use anyhow::{Context, bail};
use auth::application::{ProvisionAdminInput, ProvisionAdminUseCase, Provisioned, SessionManager};
use auth::domain::value_object::user_role::UserRole;
use auth::{AuthConfig, PgAuthRepository, RuleTablePolicy, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gateway=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let auth_config = load_auth_config()?;
    auth_config
        .validate()
        .context("Invalid gateway configuration")?;
    auth_config.warn_if_insecure();

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let repo = PgAuthRepository::new(pool.clone());
    let shared_config = Arc::new(auth_config.clone());

    // Startup cleanup: errors are logged and do not block startup
    let sessions_deleted = SessionManager::new(Arc::new(repo.clone()), shared_config.clone())
        .cleanup_expired()
        .await;
    tracing::info!(sessions_deleted, "Auth session cleanup completed");

    provision_bootstrap_admin(&repo, shared_config).await?;

    // Access policy
    let policy_file = env::var("POLICY_FILE").unwrap_or_else(|_| "config/policy.csv".to_string());
    let policy_text = std::fs::read_to_string(&policy_file)
        .with_context(|| format!("Failed to read policy file {policy_file}"))?;
    let policy: RuleTablePolicy = policy_text
        .parse()
        .with_context(|| format!("Invalid policy file {policy_file}"))?;

    tracing::info!(
        policy_file = %policy_file,
        rules = policy.rules().len(),
        "Access policy loaded"
    );

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .merge(auth_router(repo, policy, auth_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env_or("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 31113)))?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
        }
        tracing::info!("Gracefully shutdown");
    })
    .await?;

    Ok(())
}

/// Parse an optional environment variable, falling back to `default`
fn env_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {name}: {e}")),
        _ => Ok(default),
    }
}

fn load_auth_config() -> anyhow::Result<AuthConfig> {
    let defaults = AuthConfig::default();

    let token_secret = match env::var("TOKEN_SECRET") {
        Ok(secret_b64) => {
            let bytes = Engine::decode(&general_purpose::STANDARD, secret_b64.trim())
                .context("TOKEN_SECRET must be base64")?;
            <[u8; 32]>::try_from(bytes.as_slice())
                .map_err(|_| anyhow::anyhow!("TOKEN_SECRET must decode to 32 bytes"))?
        }
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("TOKEN_SECRET not set; using a random secret for this process");
            AuthConfig::with_random_secret().token_secret
        }
        Err(_) => bail!("TOKEN_SECRET must be set in production"),
    };

    let otp_bypass_code = env::var("OTP_BYPASS_CODE")
        .ok()
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty());

    let password_pepper = env::var("PASSWORD_PEPPER")
        .ok()
        .filter(|pepper| !pepper.is_empty())
        .map(String::into_bytes);

    Ok(AuthConfig {
        token_secret,
        token_ttl: Duration::from_secs(env_or(
            "TOKEN_TTL_SECS",
            defaults.token_ttl.as_secs(),
        )?),
        otp_length: env_or("OTP_LENGTH", defaults.otp_length)?,
        otp_ttl: Duration::from_secs(env_or("OTP_TTL_SECS", defaults.otp_ttl.as_secs())?),
        otp_bypass_code,
        password_pepper,
        request_timeout: Duration::from_secs(env_or(
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        )?),
    })
}

async fn provision_bootstrap_admin(
    repo: &PgAuthRepository,
    config: Arc<AuthConfig>,
) -> anyhow::Result<()> {
    let (Ok(username), Ok(password)) = (
        env::var("BOOTSTRAP_ADMIN_USERNAME"),
        env::var("BOOTSTRAP_ADMIN_PASSWORD"),
    ) else {
        return Ok(());
    };

    let outcome = ProvisionAdminUseCase::new(Arc::new(repo.clone()), config)
        .execute(ProvisionAdminInput {
            username,
            password,
            role: UserRole::Admin,
        })
        .await
        .context("Failed to provision bootstrap admin")?;

    if outcome == Provisioned::Created {
        tracing::info!("Bootstrap admin created");
    }
    Ok(())
}
