// Providers layer - Work performers and business logic
//
// Providers contain business logic and provide composable operations that
// coordinators can orchestrate.
pub mod authentication_provider;
pub mod credential_verifier;
pub mod crypto_provider;
pub mod policy_provider;
pub mod token_provider;

pub use authentication_provider::{AuthenticationProvider, IssuedSession};
pub use credential_verifier::{CredentialVerifier, PasswordCredentialVerifier};
pub use crypto_provider::CryptoProvider;
pub use policy_provider::{PolicyProvider, decide};
pub use token_provider::TokenProvider;
