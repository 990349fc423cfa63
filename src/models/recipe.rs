use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use super::account::AccountProfile;
use crate::entities::{recipes, users};
use crate::error::RecordError;

/// Minimum length of recipe instructions, counted in characters.
pub const MIN_INSTRUCTIONS_CHARS: usize = 50;

pub const INSTRUCTIONS_TOO_SHORT: &str = "instructions must be at least 50 characters";

#[must_use]
pub fn meets_minimum_length(text: &str) -> bool {
    text.chars().count() >= MIN_INSTRUCTIONS_CHARS
}

/// Recipe instructions that satisfy the minimum length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructions(String);

impl Instructions {
    pub fn parse(text: impl Into<String>) -> Result<Self, RecordError> {
        let text = text.into();
        if !meets_minimum_length(&text) {
            return Err(RecordError::validation(INSTRUCTIONS_TOO_SHORT));
        }
        Ok(Self(text))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Instructions {
    type Error = RecordError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(text)
    }
}

impl AsRef<str> for Instructions {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input for creating a recipe. Instructions are validated on construction.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub owner_id: Option<i32>,
    pub title: String,
    pub instructions: Instructions,
    pub minutes_to_complete: Option<i32>,
}

impl NewRecipe {
    pub fn new(
        owner_id: Option<i32>,
        title: impl Into<String>,
        instructions: impl Into<String>,
        minutes_to_complete: Option<i32>,
    ) -> Result<Self, RecordError> {
        Ok(Self {
            owner_id,
            title: title.into(),
            instructions: Instructions::parse(instructions)?,
            minutes_to_complete,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub owner_id: Option<i32>,
    pub title: String,
    instructions: Instructions,
    pub minutes_to_complete: Option<i32>,
    /// Owning account, when loaded alongside the recipe.
    pub owner: Option<AccountProfile>,
}

impl Recipe {
    pub fn from_model(
        model: recipes::Model,
        owner: Option<users::Model>,
    ) -> Result<Self, RecordError> {
        Ok(Self {
            id: model.id,
            owner_id: model.user_id,
            title: model.title,
            instructions: Instructions::parse(model.instructions)?,
            minutes_to_complete: model.minutes_to_complete,
            owner: owner.map(AccountProfile::from),
        })
    }

    #[must_use]
    pub fn instructions(&self) -> &str {
        self.instructions.as_str()
    }

    /// Replaces the instructions. On error the previous value is kept.
    pub fn set_instructions(&mut self, text: impl Into<String>) -> Result<(), RecordError> {
        self.instructions = Instructions::parse(text)?;
        Ok(())
    }

    /// Field mapping including the owner's profile, but not the owner's recipes.
    #[must_use]
    pub fn serialize(&self) -> Map<String, Value> {
        to_map(&self.view(Some(self.owner.as_ref())))
    }

    /// Mapping used when nested under the owning account: no `user` key.
    pub(crate) fn serialize_nested(&self) -> Map<String, Value> {
        to_map(&self.view(None))
    }

    fn view<'a>(&'a self, user: Option<Option<&'a AccountProfile>>) -> RecipeView<'a> {
        RecipeView {
            id: self.id,
            user_id: self.owner_id,
            title: &self.title,
            instructions: self.instructions.as_str(),
            minutes_to_complete: self.minutes_to_complete,
            user,
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Recipe {}, {}>", self.title, self.instructions)
    }
}

#[derive(Serialize)]
struct RecipeView<'a> {
    id: i32,
    user_id: Option<i32>,
    title: &'a str,
    instructions: &'a str,
    minutes_to_complete: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<Option<&'a AccountProfile>>,
}

pub(crate) fn to_map<T: Serialize>(value: &T) -> Map<String, Value> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        // Record views are flat structs of strings, integers and options.
        other => unreachable!("record view did not serialize to an object: {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASTA: &str = "Boil water for 10 minutes, then add pasta and stir occasionally.";

    fn recipe() -> Recipe {
        Recipe::from_model(
            recipes::Model {
                id: 7,
                user_id: Some(1),
                title: "Pasta".to_string(),
                instructions: PASTA.to_string(),
                minutes_to_complete: Some(20),
            },
            Some(users::Model {
                id: 1,
                username: "chef".to_string(),
                password_hash: Some("$argon2id$secret".to_string()),
                image_url: None,
                bio: Some("Cooks things".to_string()),
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_short_instructions_rejected() {
        let err = Instructions::parse("Boil water.").unwrap_err();
        assert!(matches!(err, RecordError::Validation(msg) if msg == INSTRUCTIONS_TOO_SHORT));
    }

    #[test]
    fn test_boundary_lengths() {
        assert!(Instructions::parse("a".repeat(49)).is_err());
        assert!(Instructions::parse("a".repeat(50)).is_ok());
        assert!(Instructions::parse(String::new()).is_err());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 25 two-byte characters: 50 bytes but only 25 characters.
        assert!(Instructions::parse("é".repeat(25)).is_err());
        assert!(Instructions::parse("é".repeat(50)).is_ok());
    }

    #[test]
    fn test_set_instructions_keeps_prior_value_on_error() {
        let mut recipe = recipe();
        assert!(recipe.set_instructions("Boil water.").is_err());
        assert_eq!(recipe.instructions(), PASTA);

        let longer = format!("{PASTA} Drain and serve with sauce.");
        recipe.set_instructions(longer.clone()).unwrap();
        assert_eq!(recipe.instructions(), longer);
    }

    #[test]
    fn test_new_recipe_validates() {
        assert!(NewRecipe::new(None, "Toast", "Toast bread.", Some(3)).is_err());
        let new = NewRecipe::new(Some(1), "Pasta", PASTA, None).unwrap();
        assert_eq!(new.instructions.as_str(), PASTA);
    }

    #[test]
    fn test_serialize_includes_owner_without_recipes_or_hash() {
        let map = recipe().serialize();

        assert_eq!(map["id"], 7);
        assert_eq!(map["user_id"], 1);
        assert_eq!(map["instructions"], PASTA);
        let user = map["user"].as_object().unwrap();
        assert_eq!(user["username"], "chef");
        assert!(!user.contains_key("recipes"));
        assert!(!user.contains_key("_password_hash"));
        assert!(!user.contains_key("password_hash"));
    }

    #[test]
    fn test_serialize_unowned_recipe_has_null_user() {
        let mut recipe = recipe();
        recipe.owner = None;
        recipe.owner_id = None;

        let map = recipe.serialize();
        assert!(map["user"].is_null());
        assert!(recipe.serialize_nested().get("user").is_none());
    }

    #[test]
    fn test_to_map_keeps_every_view_field() {
        let map = to_map(&recipe().view(Some(None)));

        let mut keys: Vec<_> = map.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["id", "instructions", "minutes_to_complete", "title", "user", "user_id"]
        );
        assert!(map["user"].is_null());
    }

    #[test]
    fn test_display() {
        let text = recipe().to_string();
        assert!(text.starts_with("<Recipe Pasta, Boil water"));
    }
}
