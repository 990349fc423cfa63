//! `SeaORM` implementation of the `RecipeService` trait.

use crate::db::Store;
use crate::error::RecordError;
use crate::models::{NewRecipe, Recipe};
use crate::services::recipe_service::{RecipeDraft, RecipeError, RecipeService};
use async_trait::async_trait;

pub struct SeaOrmRecipeService {
    store: Store,
}

impl SeaOrmRecipeService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn owner_id(&self, username: &str) -> Result<i32, RecipeError> {
        self.store
            .get_account_by_username(username)
            .await?
            .map(|a| a.id)
            .ok_or_else(|| RecipeError::OwnerNotFound(username.to_string()))
    }
}

fn not_found_as(id: i32) -> impl FnOnce(RecordError) -> RecipeError {
    move |err| match err {
        RecordError::NotFound(_) => RecipeError::NotFound(id),
        other => RecipeError::Record(other),
    }
}

#[async_trait]
impl RecipeService for SeaOrmRecipeService {
    async fn create(&self, draft: RecipeDraft) -> Result<Recipe, RecipeError> {
        let owner_id = match draft.owner.as_deref() {
            Some(username) => Some(self.owner_id(username).await?),
            None => None,
        };

        let new = NewRecipe::new(
            owner_id,
            draft.title,
            draft.instructions,
            draft.minutes_to_complete,
        )?;

        Ok(self.store.create_recipe(new).await?)
    }

    async fn get(&self, id: i32) -> Result<Recipe, RecipeError> {
        self.store
            .get_recipe(id)
            .await?
            .ok_or(RecipeError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<Recipe>, RecipeError> {
        Ok(self.store.list_recipes().await?)
    }

    async fn list_for_owner(&self, username: &str) -> Result<Vec<Recipe>, RecipeError> {
        let owner_id = self.owner_id(username).await?;
        Ok(self.store.list_recipes_for_owner(owner_id).await?)
    }

    async fn edit_instructions(&self, id: i32, text: &str) -> Result<Recipe, RecipeError> {
        self.store
            .update_recipe_instructions(id, text)
            .await
            .map_err(not_found_as(id))
    }

    async fn edit_details(
        &self,
        id: i32,
        title: Option<&str>,
        minutes_to_complete: Option<Option<i32>>,
    ) -> Result<Recipe, RecipeError> {
        let current = self.get(id).await?;
        let title = title.unwrap_or(current.title.as_str());
        let minutes = minutes_to_complete.unwrap_or(current.minutes_to_complete);

        self.store
            .update_recipe_details(id, title, minutes)
            .await
            .map_err(not_found_as(id))
    }

    async fn assign_owner(&self, id: i32, username: &str) -> Result<Recipe, RecipeError> {
        let owner_id = self.owner_id(username).await?;
        self.store
            .assign_recipe_owner(id, owner_id)
            .await
            .map_err(not_found_as(id))
    }

    async fn remove(&self, id: i32) -> Result<(), RecipeError> {
        if self.store.delete_recipe(id).await? {
            Ok(())
        } else {
            Err(RecipeError::NotFound(id))
        }
    }
}
