//! User Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    UserId, full_name::FullName, phone_number::PhoneNumber, user_name::UserName,
    user_password::UserPassword, user_role::UserRole, user_status::UserStatus,
};

/// User entity
///
/// Clients are keyed by (phone number, role) and log in with a one-time
/// code. Admins are keyed by user name and log in with a password.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub full_name: FullName,
    /// Set for password accounts only
    pub user_name: Option<UserName>,
    pub phone_number: Option<PhoneNumber>,
    /// Never serialized to clients
    pub password: Option<UserPassword>,
    pub user_role: UserRole,
    pub user_status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New phone-registered client awaiting verification
    pub fn new_client(full_name: FullName, phone_number: PhoneNumber) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            full_name,
            user_name: None,
            phone_number: Some(phone_number),
            password: None,
            user_role: UserRole::Client,
            user_status: UserStatus::InVerify,
            created_at: now,
            updated_at: now,
        }
    }

    /// New password account; active from the start
    pub fn new_admin(full_name: FullName, user_name: UserName, password: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            full_name,
            user_name: Some(user_name),
            phone_number: None,
            password: Some(password),
            user_role: UserRole::Admin,
            user_status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.user_status.is_active()
    }

    /// `InVerify` → `Active`. Returns whether anything changed.
    pub fn activate(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.user_status = UserStatus::Active;
        self.updated_at = Utc::now();
        true
    }

    pub fn set_full_name(&mut self, full_name: FullName) {
        self.full_name = full_name;
        self.updated_at = Utc::now();
    }
}
