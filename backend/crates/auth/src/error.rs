//! Auth Error Types
//!
//! Gateway-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed request input
    #[error("{0}")]
    BadRequest(String),

    /// Registration for a phone that is already verified
    #[error("User already exists")]
    Conflict,

    /// Unknown username, missing digest, or wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Submitted one-time code did not match
    #[error("Invalid OTP")]
    InvalidOtp,

    /// Session missing, inactive or expired
    #[error("Unauthorized")]
    Unauthorized,

    /// Denied by the policy oracle
    #[error("Forbidden")]
    Forbidden,

    #[error("User not found")]
    NotFound,

    /// Token is not two base64url segments, or the payload is not a claim set
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token signature mismatch")]
    SignatureMismatch,

    #[error("Token expired")]
    TokenExpired,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::BadRequest(_) | AuthError::InvalidOtp => StatusCode::BAD_REQUEST,
            AuthError::Conflict => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::Unauthorized
            | AuthError::InvalidToken
            | AuthError::SignatureMismatch
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::BadRequest(_) | AuthError::InvalidOtp => ErrorKind::BadRequest,
            AuthError::Conflict => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::Unauthorized
            | AuthError::InvalidToken
            | AuthError::SignatureMismatch
            | AuthError::TokenExpired => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::NotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable machine-readable code for the problem body
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::BadRequest(_) => "bad_request",
            AuthError::Conflict => "conflict",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::InvalidOtp => "invalid_otp",
            AuthError::Unauthorized
            | AuthError::InvalidToken
            | AuthError::SignatureMismatch
            | AuthError::TokenExpired => "unauthorized",
            AuthError::Forbidden => "forbidden",
            AuthError::NotFound => "not_found",
            AuthError::Database(_) | AuthError::Internal(_) => "internal",
        }
    }

    /// Message safe to show a client.
    ///
    /// Token failures collapse into one message; storage and internal
    /// details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AuthError::InvalidToken | AuthError::SignatureMismatch | AuthError::TokenExpired => {
                "Unauthorized".to_string()
            }
            AuthError::Database(_) | AuthError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message()).with_code(self.code())
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidOtp => {
                tracing::warn!("Invalid one-time code submitted");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::BadRequest(rejection.body_text())
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AuthError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::InvalidOtp.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::Conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_kind_agrees_with_status() {
        let all = [
            AuthError::BadRequest("x".into()),
            AuthError::Conflict,
            AuthError::InvalidCredentials,
            AuthError::InvalidOtp,
            AuthError::Unauthorized,
            AuthError::Forbidden,
            AuthError::NotFound,
            AuthError::InvalidToken,
            AuthError::SignatureMismatch,
            AuthError::TokenExpired,
            AuthError::Internal("x".into()),
        ];
        for err in all {
            assert_eq!(err.kind().status_code(), err.status_code().as_u16(), "{err}");
        }
    }

    #[test]
    fn test_token_errors_share_public_message() {
        for err in [
            AuthError::InvalidToken,
            AuthError::SignatureMismatch,
            AuthError::TokenExpired,
        ] {
            assert_eq!(err.public_message(), "Unauthorized");
            assert_eq!(err.code(), "unauthorized");
        }
    }

    #[test]
    fn test_internal_detail_not_public() {
        let err = AuthError::Internal("connection refused on 10.0.0.7".into());
        let app = err.to_app_error();
        assert_eq!(app.message(), "Internal server error");
        assert_eq!(app.code(), Some("internal"));
    }
}
