//! Value Object Module

pub mod full_name;
pub mod phone_number;
pub mod user_name;
pub mod user_password;
pub mod user_role;
pub mod user_status;

pub use kernel::id::{SessionId, UserId};
