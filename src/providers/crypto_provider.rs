use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, SaltString, rand_core::OsRng},
};

use crate::config::SecretManager;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::internal::auth::PasswordHash;

/// Argon2id password hashing keyed by the server pepper
///
/// Hashing runs on the blocking thread pool so it does not stall the
/// async executor.
pub struct CryptoProvider {
    secret_manager: Arc<SecretManager>,
}

impl CryptoProvider {
    pub fn new(secret_manager: Arc<SecretManager>) -> Self {
        Self { secret_manager }
    }

    fn argon2(pepper: &[u8]) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(pepper, Algorithm::Argon2id, Version::V0x13, Params::default())
            .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    pub async fn hash_password(&self, password: &str) -> Result<PasswordHash, InternalError> {
        let pepper = self.secret_manager.pepper().to_owned();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || -> Result<PasswordHash, InternalError> {
            let salt = SaltString::generate(&mut OsRng);
            Self::argon2(pepper.as_bytes())?
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| PasswordHash(hash.to_string()))
                .map_err(|e| CredentialError::hashing_failed(e).into())
        })
        .await
        .map_err(|e| InternalError::crypto("hash_password", e.to_string()))?
    }

    /// Returns `Ok(false)` for a wrong password or an unparseable stored hash
    pub async fn verify_password(
        &self,
        stored_hash: &str,
        password: &str,
    ) -> Result<bool, InternalError> {
        let pepper = self.secret_manager.pepper().to_owned();
        let stored_hash = stored_hash.to_owned();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || -> Result<bool, InternalError> {
            let Ok(parsed) = password_hash::PasswordHash::new(&stored_hash) else {
                tracing::warn!("Stored password hash is not in PHC format");
                return Ok(false);
            };
            Ok(Self::argon2(pepper.as_bytes())?
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .map_err(|e| InternalError::crypto("verify_password", e.to_string()))?
    }
}
