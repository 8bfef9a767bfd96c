//! Access Token Codec
//!
//! `base64url(json(claims)) "." base64url(hmac_sha256(secret, first segment))`
//!
//! The MAC is checked before the payload is decoded, so nothing from an
//! unauthenticated token reaches the JSON parser.

use std::sync::Arc;

use chrono::Utc;
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

use crate::application::config::AuthConfig;
use crate::domain::entity::claims::Claims;
use crate::error::{AuthError, AuthResult};

/// Signs and verifies access tokens
#[derive(Clone)]
pub struct TokenCodec {
    config: Arc<AuthConfig>,
}

impl TokenCodec {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Serialize and sign a claim set
    pub fn issue(&self, claims: &Claims) -> AuthResult<String> {
        let payload = serde_json::to_vec(claims)
            .map_err(|e| AuthError::Internal(format!("Failed to encode claims: {e}")))?;
        let payload = to_base64url(&payload);

        let signature = hmac_sha256(&self.config.token_secret, payload.as_bytes());

        Ok(format!("{payload}.{}", to_base64url(&signature)))
    }

    /// Verify and decode against the current time
    pub fn parse(&self, token: &str) -> AuthResult<Claims> {
        self.parse_at(token, Utc::now().timestamp())
    }

    /// Verify and decode; `now` is unix seconds
    pub fn parse_at(&self, token: &str, now: i64) -> AuthResult<Claims> {
        let mut parts = token.split('.');
        let (Some(payload), Some(signature), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::InvalidToken);
        };
        if payload.is_empty() || signature.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let signature = from_base64url(signature).map_err(|_| AuthError::InvalidToken)?;
        if !verify_hmac_sha256(&self.config.token_secret, payload.as_bytes(), &signature) {
            return Err(AuthError::SignatureMismatch);
        }

        let payload = from_base64url(payload).map_err(|_| AuthError::InvalidToken)?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::InvalidToken)?;

        if claims.is_expired_at(now) {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{SessionId, UserId, user_role::UserRole};

    fn codec() -> TokenCodec {
        TokenCodec::new(Arc::new(AuthConfig::with_random_secret()))
    }

    fn claims(iat: i64, exp: i64) -> Claims {
        Claims::new(UserId::new(), UserRole::Client, SessionId::new(), iat, exp)
    }

    #[test]
    fn test_issue_then_parse() {
        let codec = codec();
        let original = claims(1_000, 2_000);
        let token = codec.issue(&original).unwrap();

        assert_eq!(token.matches('.').count(), 1);
        assert_eq!(codec.parse_at(&token, 1_500).unwrap(), original);
    }

    #[test]
    fn test_expiry_boundary() {
        let codec = codec();
        let token = codec.issue(&claims(1_000, 2_000)).unwrap();

        assert!(codec.parse_at(&token, 1_999).is_ok());
        assert!(matches!(
            codec.parse_at(&token, 2_000),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_other_secret_is_signature_mismatch() {
        let token = codec().issue(&claims(0, i64::MAX)).unwrap();
        assert!(matches!(
            codec().parse(&token),
            Err(AuthError::SignatureMismatch)
        ));
    }

    #[test]
    fn test_tampered_payload_is_signature_mismatch() {
        let codec = codec();
        let token = codec.issue(&claims(0, i64::MAX)).unwrap();
        let (_, signature) = token.split_once('.').unwrap();

        let forged = Claims {
            role: UserRole::SuperAdmin,
            ..claims(0, i64::MAX)
        };
        let forged_payload = to_base64url(&serde_json::to_vec(&forged).unwrap());

        assert!(matches!(
            codec.parse(&format!("{forged_payload}.{signature}")),
            Err(AuthError::SignatureMismatch)
        ));
    }

    #[test]
    fn test_malformed_tokens() {
        let codec = codec();
        for token in ["", "abc", "a.b.c", "abc.***", "."] {
            assert!(
                matches!(codec.parse(token), Err(AuthError::InvalidToken)),
                "{token:?}"
            );
        }
    }

    #[test]
    fn test_signed_garbage_payload_is_invalid() {
        let codec = codec();
        let payload = to_base64url(b"{\"not\":\"claims\"}");
        let signature = hmac_sha256(&codec.config.token_secret, payload.as_bytes());
        let token = format!("{payload}.{}", to_base64url(&signature));

        assert!(matches!(codec.parse(&token), Err(AuthError::InvalidToken)));
    }
}
