//! Catalog store backed by the `products` table.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use crate::domains::stock::models::{CatalogProduct, StockStatus};
use crate::kernel::BaseCatalogStore;

/// Row shape of `products`; kind and status are stored as text
#[derive(Debug, Clone, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    sku: Option<String>,
    kind: String,
    manage_stock: bool,
    stock_quantity: Option<i64>,
    stock_status: String,
}

impl TryFrom<ProductRow> for CatalogProduct {
    type Error = anyhow::Error;

    fn try_from(row: ProductRow) -> Result<Self> {
        Ok(CatalogProduct {
            id: row.id,
            sku: row.sku,
            kind: row.kind.parse()?,
            manage_stock: row.manage_stock,
            stock_quantity: row.stock_quantity,
            stock_status: row.stock_status.parse()?,
        })
    }
}

#[derive(Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace a record (used by seeding and tests)
    pub async fn upsert(&self, product: &CatalogProduct) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, sku, kind, manage_stock, stock_quantity, stock_status)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                sku = EXCLUDED.sku,
                kind = EXCLUDED.kind,
                manage_stock = EXCLUDED.manage_stock,
                stock_quantity = EXCLUDED.stock_quantity,
                stock_status = EXCLUDED.stock_status,
                updated_at = NOW()
            "#,
        )
        .bind(product.id)
        .bind(&product.sku)
        .bind(product.kind.to_string())
        .bind(product.manage_stock)
        .bind(product.stock_quantity)
        .bind(product.stock_status.to_string())
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to upsert product {}", product.id))?;
        Ok(())
    }
}

#[async_trait]
impl BaseCatalogStore for PostgresCatalog {
    async fn is_available(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    async fn find_product_ids_by_sku(&self, sku: &str, limit: usize) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT DISTINCT id
            FROM products
            WHERE sku = $1 AND id > 0
            ORDER BY id
            LIMIT $2
            "#,
        )
        .bind(sku)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn get_product(&self, id: i64) -> Result<Option<CatalogProduct>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, sku, kind, manage_stock, stock_quantity, stock_status
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CatalogProduct::try_from).transpose()
    }

    async fn enable_stock_management(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE products SET manage_stock = true, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_stock_quantity(&self, id: i64, qty: i64) -> Result<Option<i64>> {
        sqlx::query_scalar::<_, Option<i64>>(
            r#"
            UPDATE products
            SET stock_quantity = $2, updated_at = NOW()
            WHERE id = $1 AND manage_stock = true
            RETURNING stock_quantity
            "#,
        )
        .bind(id)
        .bind(qty)
        .fetch_optional(&self.pool)
        .await
        .map(Option::flatten)
        .map_err(Into::into)
    }

    async fn set_stock_status(&self, id: i64, status: StockStatus) -> Result<()> {
        sqlx::query("UPDATE products SET stock_status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
