//! Load catalog records from a JSON file into the Postgres catalog.
//!
//! The file holds an array of product records, the same shape the in-memory
//! backend reads from `CATALOG_SEED_PATH`.

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::PgPool;
use std::path::PathBuf;
use stock_control::domains::stock::models::CatalogProduct;
use stock_control::kernel::PostgresCatalog;

#[derive(Parser)]
#[command(name = "seed_catalog")]
#[command(about = "Upsert catalog products from a JSON seed file")]
struct Cli {
    /// Path to a JSON array of product records
    file: PathBuf,

    /// Database URL (defaults to DATABASE_URL)
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let raw = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read seed file {}", cli.file.display()))?;
    let products: Vec<CatalogProduct> =
        serde_json::from_str(&raw).context("Failed to parse seed file")?;

    println!("✓ Loaded {} products from {}", products.len(), cli.file.display());

    let pool = PgPool::connect(&cli.database_url)
        .await
        .context("Failed to connect to database")?;

    println!("✓ Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let catalog = PostgresCatalog::new(pool);

    for (idx, product) in products.iter().enumerate() {
        catalog.upsert(product).await?;
        println!(
            "[{}/{}] {} #{} (sku: {})",
            idx + 1,
            products.len(),
            product.kind,
            product.id,
            product.sku.as_deref().unwrap_or("-"),
        );
    }

    println!("\n✓ Seeded {} products", products.len());

    Ok(())
}
