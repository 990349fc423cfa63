//! Recipe command handlers

use crate::config::Config;
use crate::db::Store;
use crate::models::Recipe;
use crate::services::{RecipeDraft, RecipeService, SeaOrmRecipeService};

async fn service(config: &Config) -> anyhow::Result<SeaOrmRecipeService> {
    let store = Store::from_config(config).await?;
    Ok(SeaOrmRecipeService::new(store))
}

fn print_recipe_line(recipe: &Recipe) {
    let owner = recipe
        .owner
        .as_ref()
        .map_or("-", |o| o.username.as_str());
    let minutes = recipe
        .minutes_to_complete
        .map_or_else(|| "?".to_string(), |m| m.to_string());

    println!(
        "{:>4}  {:<32} {:>5} min  owner: {}",
        recipe.id, recipe.title, minutes, owner
    );
}

pub async fn cmd_recipe_add(
    config: &Config,
    owner: Option<String>,
    title: String,
    instructions: String,
    minutes: Option<i32>,
) -> anyhow::Result<()> {
    let recipe = service(config)
        .await?
        .create(RecipeDraft {
            owner,
            title,
            instructions,
            minutes_to_complete: minutes,
        })
        .await?;

    println!("✓ Created recipe '{}' (ID: {})", recipe.title, recipe.id);
    Ok(())
}

pub async fn cmd_recipe_list(config: &Config, owner: Option<&str>) -> anyhow::Result<()> {
    let service = service(config).await?;
    let recipes = match owner {
        Some(username) => service.list_for_owner(username).await?,
        None => service.list().await?,
    };

    if recipes.is_empty() {
        println!("No recipes.");
        return Ok(());
    }

    println!("Recipes ({} total)", recipes.len());
    println!("{:-<70}", "");
    for recipe in &recipes {
        print_recipe_line(recipe);
    }

    Ok(())
}

pub async fn cmd_recipe_show(config: &Config, id: i32) -> anyhow::Result<()> {
    let recipe = service(config).await?.get(id).await?;
    println!("{}", serde_json::to_string_pretty(&recipe.serialize())?);
    Ok(())
}

pub async fn cmd_recipe_edit(
    config: &Config,
    id: i32,
    title: Option<String>,
    instructions: Option<String>,
    minutes: Option<i32>,
    clear_minutes: bool,
) -> anyhow::Result<()> {
    let service = service(config).await?;

    if let Some(text) = instructions {
        service.edit_instructions(id, &text).await?;
    }

    let minutes = if clear_minutes {
        Some(None)
    } else {
        minutes.map(Some)
    };

    let recipe = if title.is_some() || minutes.is_some() {
        service.edit_details(id, title.as_deref(), minutes).await?
    } else {
        service.get(id).await?
    };

    println!("✓ Updated: {recipe}");
    Ok(())
}

pub async fn cmd_recipe_assign(config: &Config, id: i32, owner: &str) -> anyhow::Result<()> {
    let recipe = service(config).await?.assign_owner(id, owner).await?;
    println!("✓ Recipe {} now owned by '{owner}'", recipe.id);
    Ok(())
}

pub async fn cmd_recipe_remove(config: &Config, id: i32) -> anyhow::Result<()> {
    service(config).await?.remove(id).await?;
    println!("✓ Removed recipe {id}");
    Ok(())
}
