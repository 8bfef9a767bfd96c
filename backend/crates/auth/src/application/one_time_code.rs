//! One-Time Code Store
//!
//! Numeric codes keyed by phone number on top of an [`EphemeralStore`].
//! One live code per phone; issuing again overwrites.

use std::sync::Arc;

use platform::code::generate_numeric_code;
use platform::crypto::constant_time_eq;

use crate::application::config::AuthConfig;
use crate::domain::repository::EphemeralStore;
use crate::domain::value_object::phone_number::PhoneNumber;
use crate::error::AuthResult;

/// Storage key for a phone's code
pub fn otp_key(phone: &PhoneNumber) -> String {
    format!("otp-{}", phone.as_str())
}

pub struct OneTimeCodeStore<K>
where
    K: EphemeralStore,
{
    store: Arc<K>,
    config: Arc<AuthConfig>,
}

impl<K> OneTimeCodeStore<K>
where
    K: EphemeralStore,
{
    pub fn new(store: Arc<K>, config: Arc<AuthConfig>) -> Self {
        Self { store, config }
    }

    /// Generate, store and return a fresh code
    pub async fn issue(&self, phone: &PhoneNumber) -> AuthResult<String> {
        let code = generate_numeric_code(self.config.otp_length);
        self.store
            .set(&otp_key(phone), &code, self.config.otp_ttl)
            .await?;

        // Delivery is someone else's job; never log codes above debug
        tracing::debug!(phone = %phone, code = %code, "One-time code issued");
        Ok(code)
    }

    /// Does `submitted` match the stored code (or the bypass code)?
    ///
    /// Does not consume the code.
    pub async fn verify(&self, phone: &PhoneNumber, submitted: &str) -> AuthResult<bool> {
        if let Some(bypass) = self.config.otp_bypass_code.as_deref() {
            if constant_time_eq(bypass.as_bytes(), submitted.as_bytes()) {
                tracing::warn!(phone = %phone, "One-time code accepted via bypass");
                return Ok(true);
            }
        }

        let stored = self.store.get(&otp_key(phone)).await?;
        Ok(stored.is_some_and(|code| constant_time_eq(code.as_bytes(), submitted.as_bytes())))
    }

    /// Remove the code; idempotent
    pub async fn invalidate(&self, phone: &PhoneNumber) -> AuthResult<()> {
        self.store.delete(&otp_key(phone)).await
    }
}
