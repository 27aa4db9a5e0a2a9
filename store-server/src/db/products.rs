//! Product database operations
//!
//! The live product snapshot consumed by cart and checkout: price, active
//! flag and stock are always read from here at call time, never trusted
//! from an earlier cart snapshot. Catalog management is not part of this
//! backend; `insert` exists for seeding and fixtures.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Product, ProductCreate};
use shared::util::{next_id, now_millis};
use sqlx::{SqliteConnection, SqlitePool};

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

/// Fetch a product or fail with the product-not-found code.
pub async fn require(pool: &SqlitePool, id: i64) -> AppResult<Product> {
    find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::ProductNotFound, format!("Product {id} not found"))
    })
}

pub async fn insert(pool: &SqlitePool, data: ProductCreate) -> AppResult<Product> {
    let now = now_millis();
    let id = next_id();
    sqlx::query(
        "INSERT INTO products (id, name, price, stock, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.price)
    .bind(data.stock)
    .bind(data.is_active)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::database("Failed to create product"))
}

/// Compare-and-swap stock decrement.
///
/// Applies only while `stock >= quantity`; returns `false` when the guard
/// fails (a concurrent checkout consumed the stock first). Runs on the
/// caller's connection so it participates in the checkout transaction.
pub async fn decrement_stock(
    conn: &mut SqliteConnection,
    product_id: i64,
    quantity: i64,
    now: i64,
) -> AppResult<bool> {
    let result = sqlx::query(
        "UPDATE products SET stock = stock - ?2, updated_at = ?3
         WHERE id = ?1 AND stock >= ?2",
    )
    .bind(product_id)
    .bind(quantity)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() > 0)
}
