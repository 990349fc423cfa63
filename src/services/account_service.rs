//! Domain service for account management and authentication.

use crate::error::RecordError;
use crate::models::{Account, NewAccount, ProfileUpdate};
use thiserror::Error;

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Domain service trait for accounts.
#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Creates an account, hashing the secret if one is supplied.
    ///
    /// # Errors
    ///
    /// A taken username is [`RecordError::IntegrityConstraintViolation`].
    async fn register(&self, account: NewAccount) -> Result<Account, AuthError>;

    /// Verifies credentials and returns the account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on a wrong secret or unknown user.
    async fn login(&self, username: &str, secret: &str) -> Result<Account, AuthError>;

    async fn profile(&self, username: &str) -> Result<Account, AuthError>;

    async fn list(&self) -> Result<Vec<Account>, AuthError>;

    async fn update_profile(
        &self,
        username: &str,
        update: ProfileUpdate,
    ) -> Result<Account, AuthError>;

    /// Replaces the credential. When one is already set, `current` must match it.
    async fn change_credential(
        &self,
        username: &str,
        current: Option<&str>,
        new_secret: &str,
    ) -> Result<(), AuthError>;

    /// Deletes the account along with every recipe it owns.
    async fn remove(&self, username: &str) -> Result<(), AuthError>;
}
