//! Product persistence: the `ProductStore` seam and its PostgreSQL implementation.
//! Each operation checks a connection out of the pool for its own duration only.

use crate::error::AppError;
use crate::model::Product;
use async_trait::async_trait;
use sqlx::PgPool;

const SELECT_ALL: &str = r#"SELECT id, name, description, quantity FROM "Product""#;
const SELECT_BY_ID: &str =
    r#"SELECT id, name, description, quantity FROM "Product" WHERE id = $1"#;
const INSERT: &str = r#"INSERT INTO "Product" (name, description, quantity) VALUES ($1, $2, $3) RETURNING id, name, description, quantity"#;
const UPDATE_BY_ID: &str =
    r#"UPDATE "Product" SET id = $1, name = $2, description = $3, quantity = $4 WHERE id = $1"#;
const DELETE_BY_ID: &str = r#"DELETE FROM "Product" WHERE id = $1"#;

/// Reads and writes of `Product` rows. Writes that target an id report the
/// affected-row count; callers treat anything other than 1 as not found.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every row, unordered.
    async fn list_all(&self) -> Result<Vec<Product>, AppError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, AppError>;

    /// Insert a new row; `product.id` is ignored and the stored row is returned with its assigned id.
    async fn insert(&self, product: &Product) -> Result<Product, AppError>;

    /// Replace name, description and quantity of the row with `id` in one statement.
    async fn update_by_id(&self, id: i32, product: &Product) -> Result<u64, AppError>;

    async fn delete_by_id(&self, id: i32) -> Result<u64, AppError>;

    /// Round trip to the backing store (readiness).
    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        tracing::debug!(sql = %SELECT_ALL, "query");
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, Product>(SELECT_ALL)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, AppError> {
        tracing::debug!(sql = %SELECT_BY_ID, id, "query");
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, Product>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn insert(&self, product: &Product) -> Result<Product, AppError> {
        tracing::debug!(sql = %INSERT, "query");
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, Product>(INSERT)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.quantity)
            .fetch_one(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn update_by_id(&self, id: i32, product: &Product) -> Result<u64, AppError> {
        tracing::debug!(sql = %UPDATE_BY_ID, id, "query");
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query(UPDATE_BY_ID)
            .bind(id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.quantity)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64, AppError> {
        tracing::debug!(sql = %DELETE_BY_ID, id, "query");
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
