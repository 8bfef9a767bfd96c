//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the policy gate middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::policy_gate;
pub use router::{auth_router, auth_router_generic};
