//! Application Configuration
//!
//! Configuration for the gateway's application layer. Built once at startup
//! and shared as `Arc<AuthConfig>`.

use std::ops::RangeInclusive;
use std::time::Duration;

use thiserror::Error;

/// Code accepted by [`AuthConfig::development`] in place of the real one
pub const DEVELOPMENT_BYPASS_CODE: &str = "111111";

/// Accepted one-time code lengths
pub const OTP_LENGTH_RANGE: RangeInclusive<usize> = 4..=10;

/// A setting that would leave the gateway unusable or insecure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("OTP length must be between {min} and {max} (got {actual})")]
    OtpLength { min: usize, max: usize, actual: usize },

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("OTP bypass code must be digits only")]
    BypassCode,
}

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 key for access tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Token lifetime; also the absolute session lifetime (24 hours)
    pub token_ttl: Duration,
    /// Digits in a one-time code
    pub otp_length: usize,
    /// One-time code lifetime (5 minutes)
    pub otp_ttl: Duration,
    /// Test-only code that always verifies. Off unless set.
    pub otp_bypass_code: Option<String>,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Per-request deadline applied by the router
    pub request_timeout: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_ttl: Duration::from_secs(24 * 3600),
            otp_length: 6,
            otp_ttl: Duration::from_secs(5 * 60),
            otp_bypass_code: None,
            password_pepper: None,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::random_key(),
            ..Default::default()
        }
    }

    /// Create config for development (random secret, bypass code enabled)
    pub fn development() -> Self {
        Self {
            otp_bypass_code: Some(DEVELOPMENT_BYPASS_CODE.to_string()),
            ..Self::with_random_secret()
        }
    }

    /// Token lifetime as a chrono duration
    pub fn token_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.token_ttl).unwrap_or(chrono::Duration::hours(24))
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Reject settings no request could succeed under.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !OTP_LENGTH_RANGE.contains(&self.otp_length) {
            return Err(ConfigError::OtpLength {
                min: *OTP_LENGTH_RANGE.start(),
                max: *OTP_LENGTH_RANGE.end(),
                actual: self.otp_length,
            });
        }

        for (name, value) in [
            ("Token TTL", self.token_ttl),
            ("OTP TTL", self.otp_ttl),
            ("Request timeout", self.request_timeout),
        ] {
            if value.is_zero() {
                return Err(ConfigError::ZeroDuration(name));
            }
        }

        if let Some(code) = &self.otp_bypass_code {
            if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
                return Err(ConfigError::BypassCode);
            }
        }
        Ok(())
    }

    /// Warn when the bypass code is on in a release build.
    pub fn warn_if_insecure(&self) {
        if self.otp_bypass_code.is_some() && !cfg!(debug_assertions) {
            tracing::warn!(
                "OTP bypass code is enabled in a release build; any phone can be verified with it"
            );
        }
        if self.token_secret == [0u8; 32] {
            tracing::warn!("Token secret is all zeros; tokens are forgeable");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl, Duration::from_secs(86_400));
        assert_eq!(config.otp_length, 6);
        assert_eq!(config.otp_ttl, Duration::from_secs(300));
        assert!(config.otp_bypass_code.is_none());
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_development_enables_bypass() {
        let config = AuthConfig::development();
        assert_eq!(config.otp_bypass_code.as_deref(), Some("111111"));
        assert_ne!(config.token_secret, [0u8; 32]);
    }

    #[test]
    fn test_shipped_configs_validate() {
        assert_eq!(AuthConfig::default().validate(), Ok(()));
        assert_eq!(AuthConfig::development().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_unusable_settings() {
        for otp_length in [0, 3, 11] {
            let config = AuthConfig {
                otp_length,
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::OtpLength {
                    min: 4,
                    max: 10,
                    actual: otp_length
                })
            );
        }

        let zero_ttl = AuthConfig {
            token_ttl: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(zero_ttl.validate(), Err(ConfigError::ZeroDuration("Token TTL")));

        let zero_otp_ttl = AuthConfig {
            otp_ttl: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(zero_otp_ttl.validate(), Err(ConfigError::ZeroDuration("OTP TTL")));

        let zero_timeout = AuthConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(zero_timeout.validate().is_err());

        let bad_bypass = AuthConfig {
            otp_bypass_code: Some("12ab56".to_string()),
            ..Default::default()
        };
        assert_eq!(bad_bypass.validate(), Err(ConfigError::BypassCode));
    }

    #[test]
    fn test_token_ttl_chrono() {
        let config = AuthConfig {
            token_ttl: Duration::from_secs(90),
            ..Default::default()
        };
        assert_eq!(config.token_ttl_chrono(), chrono::Duration::seconds(90));
    }
}
