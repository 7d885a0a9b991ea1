//! Products CLI
//!
//! Create, fetch, query, update and delete catalog entries from the shell.
//! Results are printed to stdout as JSON; logs go to stderr.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::{HealthStatus, check_health_detailed};
use domain_products::{
    CreateProduct, MongoProductRepository, ProductRepository, ProductService, UpdateProduct,
};
use eyre::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "products")]
#[command(about = "Manage the product catalog stored in MongoDB")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Catalog(CatalogCommand),

    /// Check MongoDB connectivity
    Health,
}

/// Commands that work on the product collection
#[derive(Subcommand)]
enum CatalogCommand {
    /// Add a product to the catalog
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        quantity: i32,

        #[arg(short, long)]
        price: Decimal,

        /// Store the product as inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Fetch a product by id
    Get { id: Uuid },

    /// List products within a price range. Omitted bounds are open.
    Query {
        #[arg(long)]
        min_price: Option<Decimal>,

        #[arg(long)]
        max_price: Option<Decimal>,
    },

    /// Change selected fields of a product
    Update {
        id: Uuid,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        quantity: Option<i32>,

        #[arg(short, long)]
        price: Option<Decimal>,

        /// true for active, false for inactive
        #[arg(long)]
        status: Option<bool>,
    },

    /// Remove a product
    Delete { id: Uuid },
}

#[derive(Serialize)]
struct Deleted {
    deleted: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    match cli.command {
        Commands::Health => health(&config).await,
        Commands::Catalog(command) => catalog(&config, command).await,
    }
}

async fn catalog(config: &Config, command: CatalogCommand) -> Result<()> {
    info!(
        database = %config.mongodb.database(),
        collection = %config.collection,
        "Connecting to MongoDB"
    );
    let client = database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = client.database(config.mongodb.database());

    let repository = MongoProductRepository::with_collection(&db, &config.collection);
    repository.init_indexes().await?;

    execute(command, &ProductService::new(repository)).await
}

async fn execute<R: ProductRepository>(
    command: CatalogCommand,
    service: &ProductService<R>,
) -> Result<()> {
    match command {
        CatalogCommand::Create {
            name,
            quantity,
            price,
            inactive,
        } => {
            let product = service
                .create(CreateProduct {
                    name,
                    quantity,
                    price,
                    status: !inactive,
                })
                .await?;
            print_json(&product)
        }

        CatalogCommand::Get { id } => print_json(&service.get(id).await?),

        CatalogCommand::Query {
            min_price,
            max_price,
        } => print_json(&service.query(min_price, max_price).await?),

        CatalogCommand::Update {
            id,
            name,
            quantity,
            price,
            status,
        } => {
            let patch = UpdateProduct {
                name,
                quantity,
                price,
                status,
            };
            print_json(&service.update(id, patch).await?)
        }

        CatalogCommand::Delete { id } => {
            let deleted = service.delete(id).await?;
            print_json(&Deleted { deleted })
        }
    }
}

/// Print the health report; an unreachable server is reported, then fails the command.
async fn health(config: &Config) -> Result<()> {
    let status = match database::mongodb::connect_from_config(&config.mongodb).await {
        Ok(client) => check_health_detailed(&client).await,
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms: 0,
        },
    };

    print_json(&status)?;

    if !status.healthy {
        eyre::bail!("MongoDB is unhealthy");
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
