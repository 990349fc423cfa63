use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use super::recipe::{Recipe, to_map};
use crate::crypto::CredentialHasher;
use crate::entities::users;
use crate::error::RecordError;

const CREDENTIAL_HIDDEN: &str = "Password hashes may not be viewed.";

/// Public profile of an account. Never carries the credential hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountProfile {
    pub id: i32,
    pub username: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

impl From<users::Model> for AccountProfile {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            image_url: model.image_url,
            bio: model.bio,
        }
    }
}

/// New values for the optional profile fields. `None` clears a field.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

/// Input for creating an account.
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub username: String,
    pub secret: Option<String>,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

impl NewAccount {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i32,
    pub username: String,
    credential_hash: Option<String>,
    pub image_url: Option<String>,
    pub bio: Option<String>,
    pub recipes: Vec<Recipe>,
}

impl Account {
    #[must_use]
    pub fn from_model(model: users::Model, recipes: Vec<Recipe>) -> Self {
        Self {
            id: model.id,
            username: model.username,
            credential_hash: model.password_hash,
            image_url: model.image_url,
            bio: model.bio,
            recipes,
        }
    }

    /// Hashes `secret` and stores only the hash.
    pub fn set_credential(
        &mut self,
        secret: &str,
        hasher: &dyn CredentialHasher,
    ) -> Result<(), RecordError> {
        self.credential_hash = Some(hasher.hash(secret.as_bytes())?);
        Ok(())
    }

    /// The credential is write-only; this always fails.
    pub fn credential(&self) -> Result<&str, RecordError> {
        Err(RecordError::AccessDenied(CREDENTIAL_HIDDEN.to_string()))
    }

    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.credential_hash.is_some()
    }

    /// # Errors
    ///
    /// Returns [`RecordError::InvalidState`] if no credential was ever set.
    pub fn authenticate(
        &self,
        secret: &str,
        hasher: &dyn CredentialHasher,
    ) -> Result<bool, RecordError> {
        let hash = self.credential_hash.as_deref().ok_or_else(|| {
            RecordError::InvalidState(format!("No credential set for user '{}'", self.username))
        })?;

        hasher.verify(hash, secret.as_bytes())
    }

    /// Hash to persist. Only the store reads this.
    pub(crate) fn stored_hash(&self) -> Option<&str> {
        self.credential_hash.as_deref()
    }

    #[must_use]
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            username: self.username.clone(),
            image_url: self.image_url.clone(),
            bio: self.bio.clone(),
        }
    }

    /// Field mapping without the credential hash. Nested recipes omit their
    /// back-reference to this account.
    #[must_use]
    pub fn serialize(&self) -> Map<String, Value> {
        let mut map = to_map(&self.profile());
        let recipes = self
            .recipes
            .iter()
            .map(|r| Value::Object(r.serialize_nested()))
            .collect();
        map.insert("recipes".to_string(), Value::Array(recipes));
        map
    }
}

// Hand-written so the hash never reaches logs.
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("has_credential", &self.has_credential())
            .field("image_url", &self.image_url)
            .field("bio", &self.bio)
            .field("recipes", &self.recipes)
            .finish()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<User {}, {}>",
            self.username,
            self.bio.as_deref().unwrap_or("None")
        )
    }
}
