use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::errors::InternalError;
use crate::errors::internal::UserError;
use crate::providers::CryptoProvider;
use crate::stores::UserStore;
use crate::types::internal::auth::Verification;

/// Checks a candidate credential for a username
///
/// Unknown users and wrong passwords are indistinguishable to callers; both
/// come back as `Verification::Invalid`. Errors are reserved for
/// infrastructure failures.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, username: &str, candidate: &str) -> Result<Verification, InternalError>;
}

/// Verifies against the argon2 hash stored on the user row
pub struct PasswordCredentialVerifier {
    db: DatabaseConnection,
    user_store: UserStore,
    crypto_provider: Arc<CryptoProvider>,
}

impl PasswordCredentialVerifier {
    pub fn new(db: DatabaseConnection, crypto_provider: Arc<CryptoProvider>) -> Self {
        Self {
            db,
            user_store: UserStore::new(),
            crypto_provider,
        }
    }
}

#[async_trait]
impl CredentialVerifier for PasswordCredentialVerifier {
    async fn verify(&self, username: &str, candidate: &str) -> Result<Verification, InternalError> {
        let user = match self.user_store.find_by_name(&self.db, username).await {
            Ok(user) => user,
            Err(InternalError::User(UserError::UserNotFound { .. })) => {
                tracing::debug!("Credential check for unknown user");
                return Ok(Verification::Invalid);
            }
            Err(e) => return Err(e),
        };

        if self
            .crypto_provider
            .verify_password(&user.password_hash, candidate)
            .await?
        {
            Ok(Verification::Valid { user_id: user.id })
        } else {
            Ok(Verification::Invalid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{setup_test_db, test_secret_manager};

    async fn verifier_with_user(username: &str, password: &str) -> (PasswordCredentialVerifier, i32) {
        let db = setup_test_db().await;
        let crypto = Arc::new(CryptoProvider::new(test_secret_manager()));
        let hash = crypto.hash_password(password).await.unwrap();
        let user = UserStore::new().create(&db, username, &hash).await.unwrap();

        (PasswordCredentialVerifier::new(db, crypto), user.id)
    }

    #[tokio::test]
    async fn test_valid_credentials() {
        let (verifier, user_id) = verifier_with_user("alice", "Password123!").await;

        let result = verifier.verify("ALICE", "Password123!").await.unwrap();

        assert_eq!(result, Verification::Valid { user_id });
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid() {
        let (verifier, _) = verifier_with_user("alice", "Password123!").await;

        let result = verifier.verify("alice", "wrong").await.unwrap();

        assert_eq!(result, Verification::Invalid);
    }

    #[tokio::test]
    async fn test_unknown_user_is_invalid() {
        let (verifier, _) = verifier_with_user("alice", "Password123!").await;

        let result = verifier.verify("mallory", "Password123!").await.unwrap();

        assert_eq!(result, Verification::Invalid);
    }
}
