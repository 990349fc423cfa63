//! Domain service for recipe operations.

use crate::error::RecordError;
use crate::models::Recipe;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Recipe not found: {0}")]
    NotFound(i32),

    #[error("Owner not found: {0}")]
    OwnerNotFound(String),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Input for [`RecipeService::create`]. The owner is looked up by username.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub owner: Option<String>,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i32>,
}

#[async_trait::async_trait]
pub trait RecipeService: Send + Sync {
    /// # Errors
    ///
    /// Short instructions are [`RecordError::Validation`]; nothing is written.
    async fn create(&self, draft: RecipeDraft) -> Result<Recipe, RecipeError>;

    async fn get(&self, id: i32) -> Result<Recipe, RecipeError>;

    async fn list(&self) -> Result<Vec<Recipe>, RecipeError>;

    async fn list_for_owner(&self, username: &str) -> Result<Vec<Recipe>, RecipeError>;

    async fn edit_instructions(&self, id: i32, text: &str) -> Result<Recipe, RecipeError>;

    /// Updates title and cooking time. `None` leaves a field as it is;
    /// `Some(None)` clears the cooking time.
    async fn edit_details(
        &self,
        id: i32,
        title: Option<&str>,
        minutes_to_complete: Option<Option<i32>>,
    ) -> Result<Recipe, RecipeError>;

    async fn assign_owner(&self, id: i32, username: &str) -> Result<Recipe, RecipeError>;

    async fn remove(&self, id: i32) -> Result<(), RecipeError>;
}
