//! Account command handlers

use crate::config::Config;
use crate::db::Store;
use crate::models::{NewAccount, ProfileUpdate};
use crate::services::{AccountService, AuthError, SeaOrmAccountService};

use super::{prompt_line, secret_or_prompt};

async fn service(config: &Config) -> anyhow::Result<SeaOrmAccountService> {
    let store = Store::from_config(config).await?;
    Ok(SeaOrmAccountService::new(store))
}

pub async fn cmd_account_add(
    config: &Config,
    username: &str,
    password: Option<String>,
    no_password: bool,
    image_url: Option<String>,
    bio: Option<String>,
) -> anyhow::Result<()> {
    let secret = if no_password {
        None
    } else {
        Some(secret_or_prompt(password, "Password: ")?)
    };

    let account = service(config)
        .await?
        .register(NewAccount {
            username: username.to_string(),
            secret,
            image_url,
            bio,
        })
        .await?;

    println!("✓ Created account '{}' (ID: {})", account.username, account.id);
    Ok(())
}

pub async fn cmd_account_list(config: &Config) -> anyhow::Result<()> {
    let accounts = service(config).await?.list().await?;

    if accounts.is_empty() {
        println!("No accounts.");
        println!();
        println!("Add one with: recipebook account add <username>");
        return Ok(());
    }

    println!("Accounts ({} total)", accounts.len());
    println!("{:-<60}", "");

    for account in accounts {
        println!(
            "{:>4}  {:<24} {} recipe(s)",
            account.id,
            account.username,
            account.recipes.len()
        );
    }

    Ok(())
}

pub async fn cmd_account_show(config: &Config, username: &str) -> anyhow::Result<()> {
    let account = service(config).await?.profile(username).await?;
    println!("{}", serde_json::to_string_pretty(&account.serialize())?);
    Ok(())
}

pub async fn cmd_account_login(
    config: &Config,
    username: &str,
    password: Option<String>,
) -> anyhow::Result<()> {
    let secret = secret_or_prompt(password, "Password: ")?;

    match service(config).await?.login(username, &secret).await {
        Ok(account) => {
            println!("✓ Authenticated as '{}'", account.username);
            Ok(())
        }
        Err(AuthError::InvalidCredentials) => {
            println!("✗ Invalid credentials");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn cmd_account_passwd(
    config: &Config,
    username: &str,
    current: Option<String>,
    new: Option<String>,
) -> anyhow::Result<()> {
    let service = service(config).await?;
    let account = service.profile(username).await?;

    let current = match current {
        Some(current) => Some(current),
        None if account.has_credential() => Some(prompt_line("Current password: ")?),
        None => None,
    };
    let new = secret_or_prompt(new, "New password: ")?;

    service
        .change_credential(username, current.as_deref(), &new)
        .await?;

    println!("✓ Password updated for '{username}'");
    Ok(())
}

pub async fn cmd_account_edit(
    config: &Config,
    username: &str,
    image_url: Option<String>,
    bio: Option<String>,
    clear_image_url: bool,
    clear_bio: bool,
) -> anyhow::Result<()> {
    let service = service(config).await?;
    let account = service.profile(username).await?;

    let update = ProfileUpdate {
        image_url: if clear_image_url {
            None
        } else {
            image_url.or(account.image_url)
        },
        bio: if clear_bio { None } else { bio.or(account.bio) },
    };

    let account = service.update_profile(username, update).await?;
    println!("✓ Updated: {account}");
    Ok(())
}

pub async fn cmd_account_remove(config: &Config, username: &str, yes: bool) -> anyhow::Result<()> {
    let service = service(config).await?;
    let account = service.profile(username).await?;

    if !yes {
        println!(
            "Remove '{}' and its {} recipe(s)?",
            account.username,
            account.recipes.len()
        );
        let input = prompt_line("Enter 'y' to confirm, anything else to cancel: ")?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    service.remove(username).await?;
    println!("✓ Removed: {}", account.username);
    Ok(())
}
