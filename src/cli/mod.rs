//! CLI module - Command-line interface for Recipebook
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Recipebook - accounts and the recipes they own
#[derive(Parser)]
#[command(name = "recipebook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create default config file
    #[command(alias = "init")]
    InitConfig,

    /// Manage accounts
    #[command(alias = "user")]
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },

    /// Manage recipes
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create an account
    Add {
        username: String,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Create the account without a password
        #[arg(long, conflicts_with = "password")]
        no_password: bool,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
    /// List accounts
    #[command(alias = "ls")]
    List,
    /// Print an account as JSON
    Show { username: String },
    /// Check a password against an account
    Login {
        username: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Set a new password
    Passwd {
        username: String,
        /// Current password, required when one is already set
        #[arg(long)]
        current: Option<String>,
        #[arg(long)]
        new: Option<String>,
    },
    /// Edit profile fields
    Edit {
        username: String,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        /// Clear the image URL
        #[arg(long, conflicts_with = "image_url")]
        clear_image_url: bool,
        /// Clear the bio
        #[arg(long, conflicts_with = "bio")]
        clear_bio: bool,
    },
    /// Delete an account and all of its recipes
    #[command(alias = "rm")]
    Remove {
        username: String,
        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum RecipeCommands {
    /// Create a recipe
    Add {
        /// Owning account
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        title: String,
        /// At least 50 characters
        #[arg(long)]
        instructions: String,
        #[arg(long)]
        minutes: Option<i32>,
    },
    /// List recipes
    #[command(alias = "ls")]
    List {
        /// Only recipes owned by this account
        #[arg(long)]
        owner: Option<String>,
    },
    /// Print a recipe as JSON
    Show { id: i32 },
    /// Edit a recipe
    Edit {
        id: i32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        instructions: Option<String>,
        #[arg(long)]
        minutes: Option<i32>,
        /// Clear the cooking time
        #[arg(long, conflicts_with = "minutes")]
        clear_minutes: bool,
    },
    /// Give an unowned (or another account's) recipe to an account
    Assign { id: i32, owner: String },
    /// Delete a recipe
    #[command(alias = "rm")]
    Remove { id: i32 },
}

pub use commands::*;
