use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tokio::task;
use tracing::{debug, info};

use crate::crypto::CredentialHasher;
use crate::entities::{prelude::*, recipes, users};
use crate::error::RecordError;
use crate::models::{Account, NewAccount, ProfileUpdate, Recipe};

pub struct AccountRepository {
    conn: DatabaseConnection,
    hasher: Arc<dyn CredentialHasher>,
}

impl AccountRepository {
    #[must_use]
    pub fn new(conn: DatabaseConnection, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { conn, hasher }
    }

    /// Insert a new account, hashing the secret if one was given.
    /// A taken username surfaces as an integrity violation from the unique index.
    pub async fn create(&self, new: NewAccount) -> Result<Account, RecordError> {
        let password_hash = match new.secret {
            Some(secret) => {
                let hasher = Arc::clone(&self.hasher);
                // Argon2 is CPU-bound; keep it off the async workers.
                let hash = task::spawn_blocking(move || hasher.hash(secret.as_bytes())).await??;
                Some(hash)
            }
            None => None,
        };

        let model = users::ActiveModel {
            username: Set(new.username),
            password_hash: Set(password_hash),
            image_url: Set(new.image_url),
            bio: Set(new.bio),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        info!(user_id = model.id, username = %model.username, "Account created");
        Ok(Account::from_model(model, Vec::new()))
    }

    /// Get account by ID, with its recipes
    pub async fn get(&self, id: i32) -> Result<Option<Account>, RecordError> {
        let Some(model) = Users::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        self.with_recipes(model).await.map(Some)
    }

    /// Get account by username, with its recipes
    pub async fn get_by_username(&self, username: &str) -> Result<Option<Account>, RecordError> {
        let Some(model) = self.find_model_by_username(username).await? else {
            return Ok(None);
        };

        self.with_recipes(model).await.map(Some)
    }

    pub async fn list(&self) -> Result<Vec<Account>, RecordError> {
        let users = Users::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await?;
        let recipes = users.load_many(Recipes, &self.conn).await?;

        users
            .into_iter()
            .zip(recipes)
            .map(|(user, recipes)| -> Result<Account, RecordError> {
                let recipes = recipes
                    .into_iter()
                    .map(|r| Recipe::from_model(r, None))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Account::from_model(user, recipes))
            })
            .collect()
    }

    pub async fn update_profile(
        &self,
        id: i32,
        update: ProfileUpdate,
    ) -> Result<Account, RecordError> {
        let model = self.find_model(id).await?;

        let mut active: users::ActiveModel = model.into();
        active.image_url = Set(update.image_url);
        active.bio = Set(update.bio);
        let model = active.update(&self.conn).await?;

        debug!(user_id = id, "Account profile updated");
        self.with_recipes(model).await
    }

    /// Hash `secret` and replace the stored credential
    pub async fn set_credential(&self, id: i32, secret: &str) -> Result<(), RecordError> {
        let model = self.find_model(id).await?;

        let mut account = Account::from_model(model.clone(), Vec::new());
        let hasher = Arc::clone(&self.hasher);
        let secret = secret.to_string();
        let account = task::spawn_blocking(move || {
            account.set_credential(&secret, hasher.as_ref())?;
            Ok::<Account, RecordError>(account)
        })
        .await??;

        let mut active: users::ActiveModel = model.into();
        active.password_hash = Set(account.stored_hash().map(str::to_string));
        active.update(&self.conn).await?;

        info!(user_id = id, "Account credential updated");
        Ok(())
    }

    /// Check `secret` against the stored credential.
    ///
    /// An unknown username is `Ok(false)`. An account that never had a
    /// credential set is [`RecordError::InvalidState`].
    pub async fn authenticate(&self, username: &str, secret: &str) -> Result<bool, RecordError> {
        let Some(model) = self.find_model_by_username(username).await? else {
            return Ok(false);
        };

        let account = Account::from_model(model, Vec::new());
        let hasher = Arc::clone(&self.hasher);
        let secret = secret.to_string();

        task::spawn_blocking(move || account.authenticate(&secret, hasher.as_ref())).await?
    }

    /// Delete an account and every recipe it owns in one transaction.
    pub async fn delete(&self, id: i32) -> Result<bool, RecordError> {
        let txn = self.conn.begin().await?;

        let recipes_removed = Recipes::delete_many()
            .filter(recipes::Column::UserId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let result = Users::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        if result.rows_affected > 0 {
            info!(user_id = id, recipes_removed, "Account deleted");
        }
        Ok(result.rows_affected > 0)
    }

    async fn find_model(&self, id: i32) -> Result<users::Model, RecordError> {
        Users::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| RecordError::not_found(format!("user {id}")))
    }

    async fn find_model_by_username(
        &self,
        username: &str,
    ) -> Result<Option<users::Model>, RecordError> {
        Ok(Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await?)
    }

    async fn with_recipes(&self, model: users::Model) -> Result<Account, RecordError> {
        let recipes = Recipes::find()
            .filter(recipes::Column::UserId.eq(model.id))
            .order_by_asc(recipes::Column::Id)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|r| Recipe::from_model(r, None))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Account::from_model(model, recipes))
    }
}
