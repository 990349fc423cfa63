pub mod cli;
pub mod config;
pub mod crypto;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod services;

use clap::Parser;
use cli::{AccountCommands, Cli, Commands, RecipeCommands};
pub use config::Config;
use config::LogFormat;
pub use error::RecordError;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber. `RUST_LOG` takes precedence over
/// `general.log_level`. Logs go to stderr so command output stays clean.
pub fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.general.log_format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;
    init_tracing(&config);

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::InitConfig => {
            let path = Config::default_config_path();
            if Config::create_default_if_missing(&path)? {
                println!("✓ Created default config at {}", path.display());
            } else {
                println!("Config already exists at {}", path.display());
            }
            Ok(())
        }

        Commands::Account { command } => match command {
            AccountCommands::Add {
                username,
                password,
                no_password,
                image_url,
                bio,
            } => cli::cmd_account_add(&config, &username, password, no_password, image_url, bio)
                .await,
            AccountCommands::List => cli::cmd_account_list(&config).await,
            AccountCommands::Show { username } => cli::cmd_account_show(&config, &username).await,
            AccountCommands::Login { username, password } => {
                cli::cmd_account_login(&config, &username, password).await
            }
            AccountCommands::Passwd {
                username,
                current,
                new,
            } => cli::cmd_account_passwd(&config, &username, current, new).await,
            AccountCommands::Edit {
                username,
                image_url,
                bio,
                clear_image_url,
                clear_bio,
            } => {
                cli::cmd_account_edit(&config, &username, image_url, bio, clear_image_url, clear_bio)
                    .await
            }
            AccountCommands::Remove { username, yes } => {
                cli::cmd_account_remove(&config, &username, yes).await
            }
        },

        Commands::Recipe { command } => match command {
            RecipeCommands::Add {
                owner,
                title,
                instructions,
                minutes,
            } => cli::cmd_recipe_add(&config, owner, title, instructions, minutes).await,
            RecipeCommands::List { owner } => cli::cmd_recipe_list(&config, owner.as_deref()).await,
            RecipeCommands::Show { id } => cli::cmd_recipe_show(&config, id).await,
            RecipeCommands::Edit {
                id,
                title,
                instructions,
                minutes,
                clear_minutes,
            } => {
                cli::cmd_recipe_edit(&config, id, title, instructions, minutes, clear_minutes)
                    .await
            }
            RecipeCommands::Assign { id, owner } => {
                cli::cmd_recipe_assign(&config, id, &owner).await
            }
            RecipeCommands::Remove { id } => cli::cmd_recipe_remove(&config, id).await,
        },
    }
}
