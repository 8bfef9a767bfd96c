//! Auth (Authentication & Access Control) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and policy traits
//! - `application/` - Use cases, token codec, session manager, policy gate
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router, gate middleware
//!
//! ## Features
//! - Client registration and login by phone number + one-time code
//! - Admin login with username + password
//! - Signed bearer tokens bound to server-side sessions
//! - Per-request policy check of (role, route, method) against a rule table
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Tokens are HMAC-SHA256 signed; the MAC is checked before the payload
//!   is decoded
//! - Session liveness is re-checked on every request, so logout takes
//!   effect before the token expires
//! - Identity headers from clients are never trusted

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::policy::{PolicyEnforcer, RuleTablePolicy};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAuthRepository, InMemoryEphemeralStore, PgAuthRepository};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
