//! Cart database operations
//!
//! One cart per user, created lazily and never deleted. Every mutation is a
//! single SQL statement that re-reads current row state inside the engine
//! (the summing upsert, the guarded delete), so concurrent calls on the
//! same cart cannot lose updates. Totals are derived on read, never stored.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Cart, CartLine, CartSummary};
use shared::util::{next_id, now_millis};
use sqlx::SqlitePool;

use super::products;
use crate::utils::validation::{validate_add_quantity, validate_set_quantity};

const LINE_SELECT: &str = "SELECT ci.id, ci.product_id, p.name AS product_name, ci.quantity,
            ci.price_snapshot, ci.price_snapshot * ci.quantity AS line_total
     FROM cart_items ci
     JOIN products p ON p.id = ci.product_id";

/// Return the user's cart, creating an empty one on first access.
pub async fn get_or_create(pool: &SqlitePool, user_id: &str) -> AppResult<Cart> {
    let now = now_millis();
    sqlx::query(
        "INSERT INTO carts (id, user_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?3)
         ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(next_id())
    .bind(user_id)
    .bind(now)
    .execute(pool)
    .await?;

    let cart = sqlx::query_as::<_, Cart>("SELECT * FROM carts WHERE user_id = ?1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(cart)
}

/// All lines of a cart, joined with product display names.
pub async fn lines(pool: &SqlitePool, cart_id: i64) -> AppResult<Vec<CartLine>> {
    let lines = sqlx::query_as::<_, CartLine>(&format!(
        "{LINE_SELECT} WHERE ci.cart_id = ?1 ORDER BY ci.created_at, ci.id"
    ))
    .bind(cart_id)
    .fetch_all(pool)
    .await?;
    Ok(lines)
}

/// Cart with derived totals, the read model for GET /api/cart.
pub async fn summary(pool: &SqlitePool, user_id: &str, delivery_fee: i64) -> AppResult<CartSummary> {
    let cart = get_or_create(pool, user_id).await?;
    let items = lines(pool, cart.id).await?;
    Ok(CartSummary::assemble(cart.id, items, delivery_fee))
}

async fn line_by_id(pool: &SqlitePool, line_id: i64) -> AppResult<CartLine> {
    let line = sqlx::query_as::<_, CartLine>(&format!("{LINE_SELECT} WHERE ci.id = ?1"))
        .bind(line_id)
        .fetch_one(pool)
        .await?;
    Ok(line)
}

async fn line_by_product(pool: &SqlitePool, cart_id: i64, product_id: i64) -> AppResult<CartLine> {
    let line = sqlx::query_as::<_, CartLine>(&format!(
        "{LINE_SELECT} WHERE ci.cart_id = ?1 AND ci.product_id = ?2"
    ))
    .bind(cart_id)
    .bind(product_id)
    .fetch_one(pool)
    .await?;
    Ok(line)
}

/// Add a product to the user's cart.
///
/// Stock is checked live against the requested quantity. If the product is
/// already in the cart the upsert *sums* the existing and incoming
/// quantities and refreshes the price snapshot to the current price.
pub async fn add_line(
    pool: &SqlitePool,
    user_id: &str,
    product_id: i64,
    quantity: i64,
) -> AppResult<CartLine> {
    validate_add_quantity(quantity)?;

    let product = products::require(pool, product_id).await?;
    if !product.is_active {
        return Err(AppError::with_message(
            ErrorCode::ProductInactive,
            format!("Product {} is not active", product.name),
        ));
    }
    if product.stock < quantity {
        return Err(AppError::out_of_stock(product.name, product.stock));
    }

    let cart = get_or_create(pool, user_id).await?;
    let now = now_millis();
    sqlx::query(
        "INSERT INTO cart_items (id, cart_id, product_id, quantity, price_snapshot, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
         ON CONFLICT (cart_id, product_id) DO UPDATE SET
             quantity = cart_items.quantity + excluded.quantity,
             price_snapshot = excluded.price_snapshot,
             updated_at = excluded.updated_at",
    )
    .bind(next_id())
    .bind(cart.id)
    .bind(product_id)
    .bind(quantity)
    .bind(product.price)
    .bind(now)
    .execute(pool)
    .await?;

    line_by_product(pool, cart.id, product_id).await
}

/// Set the quantity of a line in the caller's cart.
///
/// Quantity 0 removes the line and returns `None`; otherwise the line is
/// revalidated against live stock and the refreshed line is returned.
pub async fn set_line_quantity(
    pool: &SqlitePool,
    user_id: &str,
    line_id: i64,
    quantity: i64,
) -> AppResult<Option<CartLine>> {
    validate_set_quantity(quantity)?;

    // The line must belong to the caller's cart.
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT ci.product_id FROM cart_items ci
         JOIN carts c ON c.id = ci.cart_id
         WHERE ci.id = ?1 AND c.user_id = ?2",
    )
    .bind(line_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    let Some((product_id,)) = row else {
        return Err(AppError::with_message(
            ErrorCode::CartItemNotFound,
            "Cart item not found",
        ));
    };

    if quantity == 0 {
        sqlx::query("DELETE FROM cart_items WHERE id = ?1")
            .bind(line_id)
            .execute(pool)
            .await?;
        return Ok(None);
    }

    let product = products::require(pool, product_id).await?;
    if product.stock < quantity {
        return Err(AppError::out_of_stock(product.name, product.stock));
    }

    sqlx::query(
        "UPDATE cart_items SET quantity = ?2, price_snapshot = ?3, updated_at = ?4
         WHERE id = ?1",
    )
    .bind(line_id)
    .bind(quantity)
    .bind(product.price)
    .bind(now_millis())
    .execute(pool)
    .await?;

    line_by_id(pool, line_id).await.map(Some)
}

/// Remove a line from the caller's cart.
pub async fn remove_line(pool: &SqlitePool, user_id: &str, line_id: i64) -> AppResult<()> {
    set_line_quantity(pool, user_id, line_id, 0).await.map(|_| ())
}

/// Delete all lines. Clearing an already-empty cart is an error the caller
/// can surface.
pub async fn clear(pool: &SqlitePool, user_id: &str) -> AppResult<()> {
    let cart = get_or_create(pool, user_id).await?;
    let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = ?1")
        .bind(cart.id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::new(ErrorCode::CartEmpty));
    }
    Ok(())
}
