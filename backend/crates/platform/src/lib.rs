//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations of the gateway:
//! - Cryptographic utilities (random keys, HMAC-SHA256, base64url)
//! - Password hashing (Argon2id)
//! - Numeric one-time code generation
//! - Client identification from request headers (IP, User-Agent, bearer token)

pub mod client;
pub mod code;
pub mod crypto;
pub mod password;
