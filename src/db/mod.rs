use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::crypto::{Argon2Hasher, CredentialHasher};
use crate::error::RecordError;
use crate::models::{Account, NewAccount, NewRecipe, ProfileUpdate, Recipe};

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
    hasher: Arc<dyn CredentialHasher>,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn from_config(config: &Config) -> Result<Self> {
        let store = Self::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(store.with_hasher(Arc::new(Argon2Hasher::new(&config.security)?)))
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        // Each in-memory SQLite connection is its own database.
        let in_memory = db_url.contains(":memory:");
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        if !in_memory {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self {
            conn,
            hasher: Arc::new(Argon2Hasher::default()),
        })
    }

    /// Replaces the credential hasher used by account operations.
    #[must_use]
    pub fn with_hasher(mut self, hasher: Arc<dyn CredentialHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn account_repo(&self) -> repositories::account::AccountRepository {
        repositories::account::AccountRepository::new(self.conn.clone(), Arc::clone(&self.hasher))
    }

    fn recipe_repo(&self) -> repositories::recipe::RecipeRepository {
        repositories::recipe::RecipeRepository::new(self.conn.clone())
    }

    pub async fn create_account(&self, account: NewAccount) -> Result<Account, RecordError> {
        self.account_repo().create(account).await
    }

    pub async fn get_account(&self, id: i32) -> Result<Option<Account>, RecordError> {
        self.account_repo().get(id).await
    }

    pub async fn get_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, RecordError> {
        self.account_repo().get_by_username(username).await
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>, RecordError> {
        self.account_repo().list().await
    }

    pub async fn update_account_profile(
        &self,
        id: i32,
        update: ProfileUpdate,
    ) -> Result<Account, RecordError> {
        self.account_repo().update_profile(id, update).await
    }

    pub async fn set_account_credential(&self, id: i32, secret: &str) -> Result<(), RecordError> {
        self.account_repo().set_credential(id, secret).await
    }

    pub async fn authenticate_account(
        &self,
        username: &str,
        secret: &str,
    ) -> Result<bool, RecordError> {
        self.account_repo().authenticate(username, secret).await
    }

    pub async fn delete_account(&self, id: i32) -> Result<bool, RecordError> {
        self.account_repo().delete(id).await
    }

    pub async fn create_recipe(&self, recipe: NewRecipe) -> Result<Recipe, RecordError> {
        self.recipe_repo().create(recipe).await
    }

    pub async fn get_recipe(&self, id: i32) -> Result<Option<Recipe>, RecordError> {
        self.recipe_repo().get(id).await
    }

    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, RecordError> {
        self.recipe_repo().list().await
    }

    pub async fn list_recipes_for_owner(&self, owner_id: i32) -> Result<Vec<Recipe>, RecordError> {
        self.recipe_repo().list_for_owner(owner_id).await
    }

    pub async fn update_recipe_instructions(
        &self,
        id: i32,
        text: &str,
    ) -> Result<Recipe, RecordError> {
        self.recipe_repo().update_instructions(id, text).await
    }

    pub async fn update_recipe_details(
        &self,
        id: i32,
        title: &str,
        minutes_to_complete: Option<i32>,
    ) -> Result<Recipe, RecordError> {
        self.recipe_repo()
            .update_details(id, title, minutes_to_complete)
            .await
    }

    pub async fn assign_recipe_owner(&self, id: i32, owner_id: i32) -> Result<Recipe, RecordError> {
        self.recipe_repo().assign_owner(id, owner_id).await
    }

    pub async fn delete_recipe(&self, id: i32) -> Result<bool, RecordError> {
        self.recipe_repo().delete(id).await
    }
}
