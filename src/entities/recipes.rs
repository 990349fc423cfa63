use sea_orm::ActiveValue;
use sea_orm::entity::prelude::*;

use crate::models::recipe::{INSTRUCTIONS_TOO_SHORT, meets_minimum_length};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning account. Only unset between insert and `assign_owner`.
    pub user_id: Option<i32>,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub instructions: String,

    pub minutes_to_complete: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        // Every write of the column goes through the same check as the domain setter.
        if let ActiveValue::Set(text) = &self.instructions
            && !meets_minimum_length(text)
        {
            return Err(DbErr::Custom(INSTRUCTIONS_TOO_SHORT.to_string()));
        }
        Ok(self)
    }
}
