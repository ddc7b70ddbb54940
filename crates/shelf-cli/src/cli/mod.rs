//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use shelf_core::config::Config;
use shelf_core::logging;
use shelf_core::session::Session;

mod commands;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(version)]
#[command(about = "Terminal client for a shelf item service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the shelf server (overrides config)
    #[arg(long, env = "SHELF_BASE_URL", value_name = "URL", global = true)]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the bearer token
    Login {
        /// Email to log in with
        #[arg(long)]
        email: String,
        /// Password to log in with
        #[arg(long)]
        password: String,
    },

    /// Log out (clear the stored token)
    Logout,

    /// Show the authenticated user
    Me,

    /// Manage items
    Items {
        #[command(subcommand)]
        command: ItemsCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ItemsCommands {
    /// List all items
    List,
    /// Create an item (identifier assigned server-side)
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Update an item in place
    Update {
        /// The identifier of the item to update
        #[arg(value_name = "ID")]
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete an item
    Delete {
        /// The identifier of the item to delete
        #[arg(value_name = "ID")]
        id: i64,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    // Logs go to files under the app home; the TUI owns the terminal.
    let _log_guard = logging::init().context("init logging")?;

    let mut config = Config::load().context("load config")?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }

    // default to the interactive TUI
    let Some(command) = cli.command else {
        let session = Session::restore_default().context("restore session")?;
        return shelf_tui::run(config, session).await;
    };

    match command {
        Commands::Login { email, password } => {
            commands::login::run(&config, &email, &password).await
        }
        Commands::Logout => commands::logout::run(),
        Commands::Me => commands::me::run(&config).await,
        Commands::Items { command } => match command {
            ItemsCommands::List => commands::items::list(&config).await,
            ItemsCommands::Create { name, description } => {
                commands::items::create(&config, &name, &description).await
            }
            ItemsCommands::Update {
                id,
                name,
                description,
            } => commands::items::update(&config, id, &name, &description).await,
            ItemsCommands::Delete { id } => commands::items::delete(&config, id).await,
        },
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
