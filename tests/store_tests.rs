//! Persistence behaviour of accounts and recipes against a real SQLite file.

mod common;

use common::{PASTA, SOUP, test_store};
use recipebook::RecordError;
use recipebook::entities::{prelude::*, recipes};
use recipebook::models::{NewAccount, NewRecipe, ProfileUpdate};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

#[tokio::test]
async fn test_create_and_fetch_account() {
    let store = test_store().await;

    let created = store
        .create_account(NewAccount {
            username: "chef".to_string(),
            secret: Some("hunter2".to_string()),
            image_url: Some("https://example.com/chef.png".to_string()),
            bio: Some("Cooks things".to_string()),
        })
        .await
        .unwrap();

    let fetched = store.get_account(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.username, "chef");
    assert_eq!(fetched.bio.as_deref(), Some("Cooks things"));
    assert!(fetched.has_credential());
    assert!(fetched.recipes.is_empty());

    let by_name = store.get_account_by_username("chef").await.unwrap().unwrap();
    assert_eq!(by_name.id, created.id);

    assert!(store.get_account_by_username("nobody").await.unwrap().is_none());
    store.ping().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_username_is_integrity_violation() {
    let store = test_store().await;

    store.create_account(NewAccount::new("chef")).await.unwrap();
    let err = store
        .create_account(NewAccount::new("chef"))
        .await
        .unwrap_err();

    assert!(err.is_integrity_violation(), "unexpected error: {err:?}");
    assert_eq!(store.list_accounts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_authenticate() {
    let store = test_store().await;
    store
        .create_account(NewAccount::new("chef").with_secret("hunter2"))
        .await
        .unwrap();

    assert!(store.authenticate_account("chef", "hunter2").await.unwrap());
    assert!(!store.authenticate_account("chef", "hunter3").await.unwrap());
    assert!(!store.authenticate_account("ghost", "hunter2").await.unwrap());
}

#[tokio::test]
async fn test_authenticate_without_credential_is_invalid_state() {
    let store = test_store().await;
    store.create_account(NewAccount::new("chef")).await.unwrap();

    let err = store
        .authenticate_account("chef", "anything")
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::InvalidState(_)));
}

#[tokio::test]
async fn test_set_credential_stores_only_a_hash() {
    let store = test_store().await;
    let account = store.create_account(NewAccount::new("chef")).await.unwrap();

    store
        .set_account_credential(account.id, "first secret")
        .await
        .unwrap();
    store
        .set_account_credential(account.id, "second secret")
        .await
        .unwrap();

    assert!(!store.authenticate_account("chef", "first secret").await.unwrap());
    assert!(store.authenticate_account("chef", "second secret").await.unwrap());

    let row = Users::find_by_id(account.id)
        .one(&store.conn)
        .await
        .unwrap()
        .unwrap();
    let hash = row.password_hash.unwrap();
    assert!(hash.starts_with("$argon2id$"));
    assert!(!hash.contains("second secret"));

    let err = store
        .set_account_credential(9999, "x")
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::NotFound(_)));
}

#[tokio::test]
async fn test_update_profile() {
    let store = test_store().await;
    let account = store.create_account(NewAccount::new("chef")).await.unwrap();

    let updated = store
        .update_account_profile(
            account.id,
            ProfileUpdate {
                image_url: Some("https://example.com/a.png".to_string()),
                bio: Some("Bakes bread".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.bio.as_deref(), Some("Bakes bread"));

    let cleared = store
        .update_account_profile(account.id, ProfileUpdate::default())
        .await
        .unwrap();
    assert!(cleared.image_url.is_none());
    assert!(cleared.bio.is_none());
}

#[tokio::test]
async fn test_delete_account_cascades_to_recipes() {
    let store = test_store().await;
    let chef = store.create_account(NewAccount::new("chef")).await.unwrap();
    let other = store.create_account(NewAccount::new("other")).await.unwrap();

    for title in ["Pasta", "More pasta", "Even more pasta"] {
        store
            .create_recipe(NewRecipe::new(Some(chef.id), title, PASTA, Some(20)).unwrap())
            .await
            .unwrap();
    }
    let kept = store
        .create_recipe(NewRecipe::new(Some(other.id), "Soup", SOUP, None).unwrap())
        .await
        .unwrap();

    assert_eq!(
        store.get_account(chef.id).await.unwrap().unwrap().recipes.len(),
        3
    );

    assert!(store.delete_account(chef.id).await.unwrap());
    assert!(!store.delete_account(chef.id).await.unwrap());

    assert!(store.list_recipes_for_owner(chef.id).await.unwrap().is_empty());
    let remaining = store.list_recipes().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);
    assert_eq!(Recipes::find().count(&store.conn).await.unwrap(), 1);
}

#[tokio::test]
async fn test_recipe_instructions_validated_on_create() {
    let store = test_store().await;

    assert!(matches!(
        NewRecipe::new(None, "Pasta", "Boil water.", None),
        Err(RecordError::Validation(_))
    ));

    let exact = "a".repeat(50);
    let recipe = store
        .create_recipe(NewRecipe::new(None, "Exact", exact.clone(), None).unwrap())
        .await
        .unwrap();
    assert_eq!(recipe.instructions(), exact);
}

#[tokio::test]
async fn test_short_instructions_update_keeps_prior_value() {
    let store = test_store().await;
    let chef = store.create_account(NewAccount::new("chef")).await.unwrap();
    let recipe = store
        .create_recipe(NewRecipe::new(Some(chef.id), "Pasta", PASTA, Some(20)).unwrap())
        .await
        .unwrap();

    let err = store
        .update_recipe_instructions(recipe.id, "Boil water.")
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::Validation(_)));

    let persisted = store.get_recipe(recipe.id).await.unwrap().unwrap();
    assert_eq!(persisted.instructions(), PASTA);

    let updated = store
        .update_recipe_instructions(recipe.id, SOUP)
        .await
        .unwrap();
    assert_eq!(updated.instructions(), SOUP);
    assert_eq!(
        store.get_recipe(recipe.id).await.unwrap().unwrap().instructions(),
        SOUP
    );
}

#[tokio::test]
async fn test_entity_hook_rejects_short_instructions() {
    let store = test_store().await;

    let result = recipes::ActiveModel {
        title: Set("Sneaky".to_string()),
        instructions: Set("too short".to_string()),
        ..Default::default()
    }
    .insert(&store.conn)
    .await;

    let err = RecordError::from(result.unwrap_err());
    assert!(matches!(err, RecordError::Validation(_)));
    assert_eq!(Recipes::find().count(&store.conn).await.unwrap(), 0);
}

#[tokio::test]
async fn test_recipe_owner_must_exist() {
    let store = test_store().await;

    let err = store
        .create_recipe(NewRecipe::new(Some(42), "Pasta", PASTA, None).unwrap())
        .await
        .unwrap_err();
    assert!(err.is_integrity_violation());

    let unowned = store
        .create_recipe(NewRecipe::new(None, "Pasta", PASTA, None).unwrap())
        .await
        .unwrap();
    assert!(unowned.owner_id.is_none());

    let err = store.assign_recipe_owner(unowned.id, 42).await.unwrap_err();
    assert!(err.is_integrity_violation());

    let chef = store.create_account(NewAccount::new("chef")).await.unwrap();
    let owned = store.assign_recipe_owner(unowned.id, chef.id).await.unwrap();
    assert_eq!(owned.owner_id, Some(chef.id));
    assert_eq!(owned.owner.unwrap().username, "chef");
}

#[tokio::test]
async fn test_update_details_and_delete_recipe() {
    let store = test_store().await;
    let recipe = store
        .create_recipe(NewRecipe::new(None, "Pasta", PASTA, None).unwrap())
        .await
        .unwrap();

    let updated = store
        .update_recipe_details(recipe.id, "Quick pasta", Some(15))
        .await
        .unwrap();
    assert_eq!(updated.title, "Quick pasta");
    assert_eq!(updated.minutes_to_complete, Some(15));
    assert_eq!(updated.instructions(), PASTA);

    assert!(store.delete_recipe(recipe.id).await.unwrap());
    assert!(!store.delete_recipe(recipe.id).await.unwrap());
    assert!(store.get_recipe(recipe.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_serialization_from_store() {
    let store = test_store().await;
    let chef = store
        .create_account(NewAccount::new("chef").with_secret("hunter2"))
        .await
        .unwrap();
    let recipe = store
        .create_recipe(NewRecipe::new(Some(chef.id), "Pasta", PASTA, Some(20)).unwrap())
        .await
        .unwrap();

    let account = store.get_account(chef.id).await.unwrap().unwrap();
    let json = serde_json::to_string(&account.serialize()).unwrap();
    assert!(!json.contains("password_hash"));
    assert!(!json.contains("argon2"));
    assert!(json.contains("\"title\":\"Pasta\""));

    let map = account.serialize();
    assert!(map["recipes"][0].get("user").is_none());

    let recipe = store.get_recipe(recipe.id).await.unwrap().unwrap();
    let map = recipe.serialize();
    assert_eq!(map["user"]["username"], "chef");
    assert!(map["user"].get("recipes").is_none());
    assert!(!serde_json::to_string(&map).unwrap().contains("argon2"));
}

#[tokio::test]
async fn test_in_memory_store() {
    let store = recipebook::db::Store::new("sqlite::memory:").await.unwrap();
    let account = store.create_account(NewAccount::new("chef")).await.unwrap();
    assert!(store.get_account(account.id).await.unwrap().is_some());
}
