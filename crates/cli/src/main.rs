//! Coffee Stand CLI - manage the catalog and inspect orders from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products
//! coffee-cli products list
//!
//! # Add a product
//! coffee-cli products add --name "Iced Latte" --price 4.50
//!
//! # Delete a product (refused without --yes)
//! coffee-cli products delete 3 --yes
//!
//! # List orders
//! coffee-cli orders list
//!
//! # Print a checkout URL
//! coffee-cli checkout price_small
//! ```
//!
//! The backend location comes from `--backend-url` or `BACKEND_URL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};
use coffee_stand_core::client::{BackendClient, BackendConfig, DEFAULT_BACKEND_URL};

mod commands;

use commands::products::parse_price_arg;

#[derive(Parser)]
#[command(name = "coffee-cli")]
#[command(author, version, about = "Coffee Stand CLI tools")]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "BACKEND_URL", default_value = DEFAULT_BACKEND_URL, global = true)]
    backend_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Inspect orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Create a checkout session and print its URL
    Checkout {
        /// Price identifier of the product to buy
        price_id: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List all products
    List,
    /// Add a product
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price in USD (at most two decimal places)
        #[arg(short, long, value_parser = parse_price_arg)]
        price: String,
    },
    /// Replace a product's name and price
    Update {
        /// Product ID
        id: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long, value_parser = parse_price_arg)]
        price: String,

        /// Current price identifier
        #[arg(long)]
        price_id: String,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: String,

        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List completed orders
    List,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coffee_cli=warn,coffee_stand_core=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = BackendConfig::new(BackendConfig::parse_base_url(&cli.backend_url)?);
    let client = BackendClient::new(&config)?;
    let mut out = std::io::stdout();

    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list(&client, &mut out).await?,
            ProductAction::Add { name, price } => {
                commands::products::add(&client, &name, &price, &mut out).await?;
            }
            ProductAction::Update {
                id,
                name,
                price,
                price_id,
            } => {
                commands::products::update(&client, &id, &name, &price, &price_id, &mut out)
                    .await?;
            }
            ProductAction::Delete { id, yes } => {
                commands::products::delete(&client, &id, yes, &mut out).await?;
            }
        },
        Commands::Orders { action } => match action {
            OrderAction::List => commands::orders::list(&client, &mut out).await?,
        },
        Commands::Checkout { price_id } => {
            commands::checkout::create(&client, &price_id, &mut out).await?;
        }
    }

    out.flush()?;
    Ok(())
}
