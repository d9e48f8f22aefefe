use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::common::auth::ApiKey;

/// Which catalog store backs the stock endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogBackend {
    Memory,
    Postgres,
}

impl FromStr for CatalogBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(CatalogBackend::Memory),
            "postgres" => Ok(CatalogBackend::Postgres),
            other => Err(anyhow::anyhow!("Invalid catalog backend: {}", other)),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub catalog_backend: CatalogBackend,
    pub database_url: Option<String>,
    pub catalog_seed_path: Option<PathBuf>,
    pub api_keys: Vec<ApiKey>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let catalog_backend: CatalogBackend = env::var("CATALOG_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .parse()
            .context("CATALOG_BACKEND must be 'memory' or 'postgres'")?;

        let database_url = env::var("DATABASE_URL").ok();
        if catalog_backend == CatalogBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL must be set when CATALOG_BACKEND=postgres");
        }

        let api_keys = match env::var("STOCK_CONTROL_API_KEYS") {
            Ok(raw) => parse_api_keys(&raw).context("STOCK_CONTROL_API_KEYS is malformed")?,
            Err(_) => Vec::new(),
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            catalog_backend,
            database_url,
            catalog_seed_path: env::var("CATALOG_SEED_PATH").ok().map(PathBuf::from),
            api_keys,
        })
    }
}

/// Parse a comma-separated list of `token` or `token:cap1|cap2` entries.
pub fn parse_api_keys(raw: &str) -> Result<Vec<ApiKey>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::parse)
        .collect()
}
