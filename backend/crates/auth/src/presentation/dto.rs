//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::AuthenticatedUser;
use crate::domain::entity::user::User;

// ============================================================================
// Admin Login
// ============================================================================

/// Admin login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginAdminRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Phone Registration / Login
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub phone_number: String,
}

/// Verify phone request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPhoneRequest {
    pub phone_number: String,
    pub otp: String,
}

/// Client login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub phone_number: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Public user fields, plus the access token right after a login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub username: Option<String>,
    pub phone_number: Option<String>,
    pub user_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            full_name: user.full_name.as_str().to_string(),
            username: user.user_name.as_ref().map(|n| n.as_str().to_string()),
            phone_number: user.phone_number.as_ref().map(|p| p.as_str().to_string()),
            user_type: user.user_role.code().to_string(),
            status: user.user_status.code().to_string(),
            access_token: None,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<AuthenticatedUser> for UserResponse {
    fn from(auth: AuthenticatedUser) -> Self {
        Self {
            access_token: Some(auth.access_token),
            ..Self::from(&auth.user)
        }
    }
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Liveness probe
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{full_name::FullName, phone_number::PhoneNumber};

    #[test]
    fn test_user_response_is_camel_case() {
        let user = User::new_client(
            FullName::new("Ali Valiyev").unwrap(),
            PhoneNumber::new("+998901234567").unwrap(),
        );
        let value = serde_json::to_value(UserResponse::from(&user)).unwrap();

        assert_eq!(value["fullName"], "Ali Valiyev");
        assert_eq!(value["phoneNumber"], "+998901234567");
        assert_eq!(value["userType"], "client");
        assert_eq!(value["status"], "in_verify");
        assert!(value["username"].is_null());
        assert!(value.get("accessToken").is_none());
        assert!(value.get("password").is_none());
    }

    #[test]
    fn test_request_field_names() {
        let req: VerifyPhoneRequest =
            serde_json::from_str(r#"{"phoneNumber":"+998901234567","otp":"123456"}"#).unwrap();
        assert_eq!(req.phone_number, "+998901234567");
        assert_eq!(req.otp, "123456");
    }
}
