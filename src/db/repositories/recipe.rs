use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info};

use crate::entities::{prelude::*, recipes, users};
use crate::error::RecordError;
use crate::models::{NewRecipe, Recipe};

pub struct RecipeRepository {
    conn: DatabaseConnection,
}

impl RecipeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, new: NewRecipe) -> Result<Recipe, RecordError> {
        let owner = match new.owner_id {
            Some(owner_id) => Some(self.require_owner(owner_id).await?),
            None => None,
        };

        let model = recipes::ActiveModel {
            user_id: Set(new.owner_id),
            title: Set(new.title),
            instructions: Set(new.instructions.into_inner()),
            minutes_to_complete: Set(new.minutes_to_complete),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        info!(recipe_id = model.id, owner_id = ?model.user_id, "Recipe created");
        Recipe::from_model(model, owner)
    }

    /// Get recipe by ID, with its owner
    pub async fn get(&self, id: i32) -> Result<Option<Recipe>, RecordError> {
        let row = Recipes::find_by_id(id)
            .find_also_related(Users)
            .one(&self.conn)
            .await?;

        row.map(|(recipe, owner)| Recipe::from_model(recipe, owner))
            .transpose()
    }

    pub async fn list(&self) -> Result<Vec<Recipe>, RecordError> {
        let rows = Recipes::find()
            .find_also_related(Users)
            .order_by_asc(recipes::Column::Id)
            .all(&self.conn)
            .await?;

        rows.into_iter()
            .map(|(recipe, owner)| Recipe::from_model(recipe, owner))
            .collect()
    }

    pub async fn list_for_owner(&self, owner_id: i32) -> Result<Vec<Recipe>, RecordError> {
        let rows = Recipes::find()
            .find_also_related(Users)
            .filter(recipes::Column::UserId.eq(owner_id))
            .order_by_asc(recipes::Column::Id)
            .all(&self.conn)
            .await?;

        rows.into_iter()
            .map(|(recipe, owner)| Recipe::from_model(recipe, owner))
            .collect()
    }

    /// Validated write of the instructions. A rejected value leaves the row untouched.
    pub async fn update_instructions(&self, id: i32, text: &str) -> Result<Recipe, RecordError> {
        let (model, owner) = self.find_with_owner(id).await?;

        let mut recipe = Recipe::from_model(model.clone(), owner.clone())?;
        recipe.set_instructions(text)?;

        let mut active: recipes::ActiveModel = model.into();
        active.instructions = Set(recipe.instructions().to_string());
        let model = active.update(&self.conn).await?;

        debug!(recipe_id = id, "Recipe instructions updated");
        Recipe::from_model(model, owner)
    }

    pub async fn update_details(
        &self,
        id: i32,
        title: &str,
        minutes_to_complete: Option<i32>,
    ) -> Result<Recipe, RecordError> {
        let (model, owner) = self.find_with_owner(id).await?;

        let mut active: recipes::ActiveModel = model.into();
        active.title = Set(title.to_string());
        active.minutes_to_complete = Set(minutes_to_complete);
        let model = active.update(&self.conn).await?;

        debug!(recipe_id = id, "Recipe details updated");
        Recipe::from_model(model, owner)
    }

    pub async fn assign_owner(&self, id: i32, owner_id: i32) -> Result<Recipe, RecordError> {
        let (model, _) = self.find_with_owner(id).await?;
        let owner = self.require_owner(owner_id).await?;

        let mut active: recipes::ActiveModel = model.into();
        active.user_id = Set(Some(owner_id));
        let model = active.update(&self.conn).await?;

        info!(recipe_id = id, owner_id, "Recipe owner assigned");
        Recipe::from_model(model, Some(owner))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, RecordError> {
        let result = Recipes::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_with_owner(
        &self,
        id: i32,
    ) -> Result<(recipes::Model, Option<users::Model>), RecordError> {
        Recipes::find_by_id(id)
            .find_also_related(Users)
            .one(&self.conn)
            .await?
            .ok_or_else(|| RecordError::not_found(format!("recipe {id}")))
    }

    /// The owner must be a live account before the foreign key is written.
    async fn require_owner(&self, owner_id: i32) -> Result<users::Model, RecordError> {
        Users::find_by_id(owner_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| {
                RecordError::IntegrityConstraintViolation(format!(
                    "recipes.user_id references missing user {owner_id}"
                ))
            })
    }
}
