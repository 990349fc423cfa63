//! `SeaORM` implementation of the `AccountService` trait.

use crate::db::Store;
use crate::models::{Account, NewAccount, ProfileUpdate};
use crate::services::account_service::{AccountService, AuthError};
use async_trait::async_trait;
use tracing::warn;

pub struct SeaOrmAccountService {
    store: Store,
}

impl SeaOrmAccountService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn require(&self, username: &str) -> Result<Account, AuthError> {
        self.store
            .get_account_by_username(username)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(username.to_string()))
    }
}

#[async_trait]
impl AccountService for SeaOrmAccountService {
    async fn register(&self, mut account: NewAccount) -> Result<Account, AuthError> {
        account.username = account.username.trim().to_string();
        if account.username.is_empty() {
            return Err(AuthError::Validation("Username cannot be empty".to_string()));
        }

        Ok(self.store.create_account(account).await?)
    }

    async fn login(&self, username: &str, secret: &str) -> Result<Account, AuthError> {
        let is_valid = self.store.authenticate_account(username, secret).await?;

        if !is_valid {
            warn!(username, "Failed login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        self.require(username).await
    }

    async fn profile(&self, username: &str) -> Result<Account, AuthError> {
        self.require(username).await
    }

    async fn list(&self) -> Result<Vec<Account>, AuthError> {
        Ok(self.store.list_accounts().await?)
    }

    async fn update_profile(
        &self,
        username: &str,
        update: ProfileUpdate,
    ) -> Result<Account, AuthError> {
        let account = self.require(username).await?;
        Ok(self.store.update_account_profile(account.id, update).await?)
    }

    async fn change_credential(
        &self,
        username: &str,
        current: Option<&str>,
        new_secret: &str,
    ) -> Result<(), AuthError> {
        let account = self.require(username).await?;

        if account.has_credential() {
            let Some(current) = current else {
                return Err(AuthError::InvalidCredentials);
            };
            if !self.store.authenticate_account(username, current).await? {
                warn!(username, "Credential change rejected: current secret mismatch");
                return Err(AuthError::InvalidCredentials);
            }
        }

        self.store
            .set_account_credential(account.id, new_secret)
            .await?;
        Ok(())
    }

    async fn remove(&self, username: &str) -> Result<(), AuthError> {
        let account = self.require(username).await?;
        if self.store.delete_account(account.id).await? {
            Ok(())
        } else {
            Err(AuthError::UserNotFound(username.to_string()))
        }
    }
}
