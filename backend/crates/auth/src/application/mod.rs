//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod issue_credential;
pub mod login;
pub mod login_admin;
pub mod me;
pub mod one_time_code;
pub mod policy_gate;
pub mod provision_admin;
pub mod register;
pub mod session;
pub mod sign_out;
pub mod token;
pub mod verify_phone;

// Re-exports
pub use config::AuthConfig;
pub use issue_credential::{AuthenticatedUser, CredentialIssuer};
pub use login::LoginUseCase;
pub use login_admin::{LoginAdminInput, LoginAdminUseCase};
pub use me::MeUseCase;
pub use one_time_code::OneTimeCodeStore;
pub use policy_gate::PolicyGate;
pub use provision_admin::{ProvisionAdminInput, ProvisionAdminUseCase, Provisioned};
pub use register::{RegisterInput, RegisterUseCase};
pub use session::SessionManager;
pub use sign_out::SignOutUseCase;
pub use token::TokenCodec;
pub use verify_phone::{VerifyPhoneInput, VerifyPhoneUseCase};
