//! # FlowMart CLI
//!
//! Command-line front end for the FlowMart inventory API.
//! This crate provides the argument parsing, configuration file handling,
//! token persistence and command routing; every remote call goes through
//! [`flowmart_api::FlowMart`].

pub mod commands;
pub mod config;
pub mod display;
pub mod logging;
pub mod storage;

pub use config::Config;

use clap::{Parser, Subcommand};
use flowmart_api::{ClientConfig, CredentialStore, FlowMart, InMemoryCredentialStore};
use std::sync::Arc;
use storage::FileCredentialStore;
use thiserror::Error;

/// Application-level errors for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] flowmart_core::FlowMartError),

    #[error("Client setup failed: {0}")]
    Sdk(#[from] flowmart_api::SdkError),

    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input error: {0}")]
    Input(#[from] dialoguer::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Main CLI struct
#[derive(Parser)]
#[command(name = "flowmart")]
#[command(about = "Manage FlowMart categories, products and your account")]
#[command(version)]
pub struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login(commands::auth::LoginArgs),
    /// Forget the stored session token
    Logout,
    /// Create a new account
    Register(commands::auth::RegisterArgs),
    /// Show the logged-in account
    Whoami,
    /// Update or delete your account
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Manage categories
    #[command(alias = "category")]
    Categories {
        #[command(subcommand)]
        action: CategoryCommands,
    },
    /// Manage products
    #[command(alias = "product")]
    Products {
        #[command(subcommand)]
        action: ProductCommands,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Change one or more account fields
    Update(commands::profile::UpdateArgs),
    /// Delete the account on the server and forget the token
    Delete {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    Ls,
    /// Create a category
    Create {
        /// Category name
        name: String,
    },
    /// Rename a category
    Update {
        /// Category ID
        id: i64,
        /// New name
        name: String,
    },
    /// Delete a category
    Rm {
        /// Category ID
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// List products
    Ls {
        /// Only products in this category
        #[arg(short, long, value_name = "CATEGORY_ID")]
        category: Option<i64>,
    },
    /// Create a product
    Create(commands::products::ProductArgs),
    /// Replace a product's fields
    Update {
        /// Product ID
        id: i64,
        #[command(flatten)]
        product: commands::products::ProductArgs,
    },
    /// Delete a product
    Rm {
        /// Product ID
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Get configuration value
    Get {
        /// Configuration key, e.g. api.base_url
        key: String,
    },
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
    /// Remove a configuration value
    Unset {
        /// Configuration key
        key: String,
    },
    /// Print the configuration file path
    Path,
}

/// Build the SDK from the config file, environment and stored token.
pub fn build_client(config: &Config) -> Result<FlowMart> {
    client_for(config, config.client_config()?)
}

// A token from FLOWMART_API_KEY lasts for this run only and never replaces
// the one saved by `flowmart login`.
fn client_for(config: &Config, client_config: ClientConfig) -> Result<FlowMart> {
    let store: Arc<dyn CredentialStore> = match client_config.initial_token.as_deref() {
        Some(token) if !token.is_empty() => Arc::new(InMemoryCredentialStore::with_token(token)),
        _ => Arc::new(FileCredentialStore::new(config.credentials_path())),
    };
    Ok(FlowMart::with_credentials(client_config, store)?)
}

/// Main CLI runner
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let mut config = Config::new()?;

    match cli.command {
        Commands::Login(args) => commands::auth::handle_login(args, &build_client(&config)?).await,
        Commands::Logout => commands::auth::handle_logout(&build_client(&config)?),
        Commands::Register(args) => {
            commands::auth::handle_register(args, &build_client(&config)?).await
        }
        Commands::Whoami => commands::auth::handle_whoami(&build_client(&config)?).await,
        Commands::Profile { action } => {
            commands::profile::handle(action, &build_client(&config)?).await
        }
        Commands::Categories { action } => {
            commands::categories::handle(action, &build_client(&config)?).await
        }
        Commands::Products { action } => {
            commands::products::handle(action, &build_client(&config)?).await
        }
        Commands::Config { action } => commands::config::handle(action, &mut config),
    }
}
