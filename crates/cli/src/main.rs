//! Bluewater CLI - operator tools for the back office.
//!
//! # Usage
//!
//! ```bash
//! # Sign in and print a bearer token
//! export BW_TOKEN=$(bw-cli login -e ops@bluewater-supply.com)
//!
//! # Check whether the backend holds an eBay token for this operator
//! bw-cli ebay status -e ops@bluewater-supply.com
//!
//! # Sync eBay listings into the catalogue, page by page
//! bw-cli ebay sync -e ops@bluewater-supply.com
//! ```
//!
//! # Environment Variables
//!
//! - `BW_BACKEND_URL` - Single backend origin serving every resource
//!   (otherwise the per-resource `*_API_URL` variables are read)
//! - `BW_PASSWORD` - Password for `login`
//! - `BW_TOKEN` - Bearer token for `ebay` commands

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bw-cli")]
#[command(author, version, about = "Bluewater back-office tools")]
struct Cli {
    /// Backend origin; every resource is served under it (`{origin}/products`, ...)
    #[arg(long, env = "BW_BACKEND_URL", global = true)]
    backend: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and print the bearer token
    Login {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password
        #[arg(long, env = "BW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// eBay connection and product sync
    Ebay {
        #[command(subcommand)]
        action: EbayAction,
    },
}

#[derive(Subcommand)]
enum EbayAction {
    /// Show whether the backend holds an eBay token
    Status {
        #[command(flatten)]
        auth: commands::SessionArgs,
    },
    /// Sync eBay listings into the catalogue
    Sync {
        #[command(flatten)]
        auth: commands::SessionArgs,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bluewater_cli=info,bluewater_admin=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let clients = commands::clients(cli.backend.as_deref())?;
    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&clients, &email, password.into()).await?;
        }
        Commands::Ebay { action } => match action {
            EbayAction::Status { auth } => commands::ebay::status(&clients, &auth).await,
            EbayAction::Sync { auth } => commands::ebay::sync(&clients, &auth).await?,
        },
    }
    Ok(())
}
