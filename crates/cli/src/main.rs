//! ChartedArt CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! ca-cli migrate
//!
//! # Put a user on the admin allowlist
//! ca-cli admin grant -e admin@example.com
//!
//! # Take a user off the admin allowlist
//! ca-cli admin revoke -e admin@example.com
//!
//! # List allowlisted admins
//! ca-cli admin list
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin grant|revoke|list` - Manage the admin allowlist

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ca-cli")]
#[command(author, version, about = "ChartedArt CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage the admin allowlist
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Put a user on the admin allowlist
    Grant {
        /// The user's email address
        #[arg(short, long)]
        email: String,
    },
    /// Take a user off the admin allowlist
    Revoke {
        /// The user's email address
        #[arg(short, long)]
        email: String,
    },
    /// List allowlisted admins
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Grant { email } => commands::admin::grant(&email).await?,
            AdminAction::Revoke { email } => commands::admin::revoke(&email).await?,
            AdminAction::List => commands::admin::list().await?,
        },
    }

    Ok(())
}
