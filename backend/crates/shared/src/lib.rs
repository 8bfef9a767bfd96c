//! Shared Kernel
//!
//! The vocabulary every gateway crate agrees on:
//! - Error classification ([`error::kind::ErrorKind`]) and the unified
//!   [`error::app_error::AppError`] rendered as RFC 7807 problem details
//! - Typed UUID identifiers ([`id::Id`])
//!
//! Only things that mean the same in every layer belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
