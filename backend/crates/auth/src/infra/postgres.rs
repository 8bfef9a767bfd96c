//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{EphemeralStore, SessionRepository, UserRepository};
use crate::domain::value_object::{
    SessionId, UserId, full_name::FullName, phone_number::PhoneNumber, user_name::UserName,
    user_password::UserPassword, user_role::UserRole, user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed repository for users, sessions and one-time codes
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Unique violations (23505) are conflicts; everything else stays a
/// database error.
fn map_write_error(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => AuthError::Conflict,
        _ => AuthError::Database(err),
    }
}

const USER_COLUMNS: &str = r#"
    id,
    full_name,
    username,
    phone_number,
    password_hash,
    user_type,
    status,
    created_at,
    updated_at
"#;

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                full_name,
                username,
                phone_number,
                password_hash,
                user_type,
                status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.full_name.as_str())
        .bind(user.user_name.as_ref().map(|n| n.as_str()))
        .bind(user.phone_number.as_ref().map(|p| p.as_str()))
        .bind(user.password.as_ref().map(|p| p.as_phc_string()))
        .bind(user.user_role.code())
        .bind(user.user_status.code())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_phone_and_role(
        &self,
        phone: &PhoneNumber,
        role: UserRole,
    ) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE phone_number = $1 AND user_type = $2"
        ))
        .bind(phone.as_str())
        .bind(role.code())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                full_name = $2,
                username = $3,
                phone_number = $4,
                password_hash = $5,
                user_type = $6,
                status = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.full_name.as_str())
        .bind(user.user_name.as_ref().map(|n| n.as_str()))
        .bind(user.phone_number.as_ref().map(|p| p.as_str()))
        .bind(user.password.as_ref().map(|p| p.as_phc_string()))
        .bind(user.user_role.code())
        .bind(user.user_status.code())
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::NotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                id,
                user_id,
                ip_address,
                user_agent,
                is_active,
                expires_at,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(&session.ip_address)
        .bind(&session.user_agent)
        .bind(session.is_active)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: &SessionId) -> AuthResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                id,
                user_id,
                ip_address,
                user_agent,
                is_active,
                expires_at,
                created_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn deactivate(&self, session_id: &SessionId) -> AuthResult<()> {
        sqlx::query("UPDATE sessions SET is_active = FALSE WHERE id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Ephemeral Store Implementation
// ============================================================================

impl EphemeralStore for PgAuthRepository {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AuthResult<()> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid TTL: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO ephemeral_kv (key, value, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (key) DO UPDATE SET
                value = EXCLUDED.value,
                expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now() + ttl)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM ephemeral_kv WHERE key = $1 AND expires_at > NOW()",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }

    async fn delete(&self, key: &str) -> AuthResult<()> {
        sqlx::query("DELETE FROM ephemeral_kv WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    full_name: String,
    username: Option<String>,
    phone_number: Option<String>,
    password_hash: Option<String>,
    user_type: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let user_role = UserRole::from_code(&self.user_type)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user_type: {}", self.user_type)))?;
        let user_status = UserStatus::from_code(&self.status)
            .ok_or_else(|| AuthError::Internal(format!("Invalid status: {}", self.status)))?;
        let password = self.password_hash.map(UserPassword::from_db);

        Ok(User {
            user_id: UserId::from_uuid(self.id),
            full_name: FullName::from_db(self.full_name),
            user_name: self.username.map(UserName::from_db),
            phone_number: self.phone_number.map(PhoneNumber::from_db),
            password,
            user_role,
            user_status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_id: Uuid,
    ip_address: Option<String>,
    user_agent: Option<String>,
    is_active: bool,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: SessionId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            is_active: self.is_active,
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}
