//! Roots n Juices CLI - Catalog management and cart quotes.
//!
//! # Usage
//!
//! ```bash
//! # List every product, most reviewed first
//! rnj-cli catalog list
//!
//! # Search the catalog
//! rnj-cli catalog list --search organic
//!
//! # Add a product from a YAML draft
//! rnj-cli catalog add kale-crunch.yaml
//!
//! # Dashboard figures
//! rnj-cli catalog stats
//!
//! # Price a cart
//! rnj-cli cart quote 1 1 6:Large
//! ```
//!
//! # Commands
//!
//! - `catalog` - List, inspect and edit the persisted catalog
//! - `cart quote` - Price a cart against the current catalog
//!
//! The catalog lives in `STOREFRONT_DATA_DIR` (see `StorefrontConfig`), so
//! every invocation sees the edits of the previous one.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rootsnjuices_core::ProductId;
use rootsnjuices_storefront::listing::{DEFAULT_MAX_PRICE, ListingQuery, SortOrder};
use rootsnjuices_storefront::{Session, StorefrontConfig};

use commands::CliError;
use commands::cart::QuoteItem;
use commands::catalog::ListArgs;

mod commands;

#[derive(Parser)]
#[command(name = "rnj-cli")]
#[command(author, version, about = "Roots n Juices catalog tools")]
struct Cli {
    /// Snapshot directory (overrides `STOREFRONT_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Work with a cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Category slug, or `all`
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Free-text search; takes precedence over the category
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order (`popular`, `price-low`, `price-high`, `rating`)
        #[arg(long, default_value_t = SortOrder::Popular)]
        sort: SortOrder,

        /// Minimum price
        #[arg(long, default_value_t = Decimal::ZERO)]
        min_price: Decimal,

        /// Maximum price
        #[arg(long, default_value_t = DEFAULT_MAX_PRICE)]
        max_price: Decimal,

        /// Only products carrying one of these tags (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,
    },
    /// Show one product
    Show {
        id: i32,

        /// Print the stored JSON record
        #[arg(long)]
        json: bool,
    },
    /// Create a product from a YAML draft
    Add { file: PathBuf },
    /// Replace a product with a YAML draft
    Update { id: i32, file: PathBuf },
    /// Delete a product
    Delete { id: i32 },
    /// Restore the built-in catalog
    Reset,
    /// Show dashboard statistics
    Stats,
    /// Export a product as a YAML draft
    Draft {
        id: i32,

        /// Write the draft here instead of logging it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Price a cart built from `id` or `id:size` items
    Quote {
        #[arg(required = true)]
        items: Vec<QuoteItem>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rnj_cli=info,rootsnjuices=info".into());
    let json_layer = cli
        .json_logs
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!cli.json_logs).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .without_time()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    tracing::debug!(data_dir = %config.data_dir.display(), "configuration loaded");

    let mut session = Session::open(&config);

    match cli.command {
        Commands::Catalog { action } => {
            let store = session.catalog();
            match action {
                CatalogAction::List {
                    category,
                    search,
                    sort,
                    min_price,
                    max_price,
                    tag,
                } => {
                    let args = ListArgs {
                        category,
                        search,
                        query: ListingQuery {
                            min_price,
                            max_price,
                            tags: tag,
                            sort,
                        },
                    };
                    commands::catalog::list(store, &args)?;
                }
                CatalogAction::Show { id, json } => {
                    commands::catalog::show(store, ProductId::new(id), json)?;
                }
                CatalogAction::Add { file } => commands::catalog::add(store, &file).await?,
                CatalogAction::Update { id, file } => {
                    commands::catalog::update(store, ProductId::new(id), &file).await?;
                }
                CatalogAction::Delete { id } => {
                    commands::catalog::delete(store, ProductId::new(id))?;
                }
                CatalogAction::Reset => commands::catalog::reset(store)?,
                CatalogAction::Stats => commands::catalog::stats(store),
                CatalogAction::Draft { id, output } => {
                    commands::catalog::draft(store, ProductId::new(id), output.as_deref())
                        .await?;
                }
            }
        }
        Commands::Cart { action } => match action {
            CartAction::Quote { items } => {
                commands::cart::quote(&mut session, &items)?;
            }
        },
    }
    Ok(())
}
