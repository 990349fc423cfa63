mod account;
mod recipe;

pub use account::{
    cmd_account_add, cmd_account_edit, cmd_account_list, cmd_account_login,
    cmd_account_passwd, cmd_account_remove, cmd_account_show,
};
pub use recipe::{
    cmd_recipe_add, cmd_recipe_assign, cmd_recipe_edit, cmd_recipe_list, cmd_recipe_remove,
    cmd_recipe_show,
};

use anyhow::Context;
use std::io::Write;

/// Reads one line from stdin after printing `prompt`.
fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .context("Failed to read from stdin")?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

fn secret_or_prompt(secret: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match secret {
        Some(secret) => Ok(secret),
        None => prompt_line(prompt),
    }
}
