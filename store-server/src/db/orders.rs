//! Order database operations
//!
//! Orders are written once by the checkout engine; afterwards only
//! `status`, `payment_url` and `updated_at` ever change, and both mutations
//! are compare-and-swap updates guarded on the current status so a stale
//! read can never blindly overwrite a concurrent transition.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderDetail, OrderItem, OrderPage, OrderStatus};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

/// Fetch an order or fail with the order-not-found code.
pub async fn require(pool: &SqlitePool, id: i64) -> AppResult<Order> {
    find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
    })
}

pub async fn items(pool: &SqlitePool, order_id: i64) -> AppResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT * FROM order_items WHERE order_id = ?1 ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn detail(pool: &SqlitePool, id: i64) -> AppResult<OrderDetail> {
    let order = require(pool, id).await?;
    let items = items(pool, id).await?;
    Ok(OrderDetail { order, items })
}

/// Orders owned by one user, newest first.
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: &str,
    page: i64,
    limit: i64,
) -> AppResult<OrderPage> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = ?1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE user_id = ?1
         ORDER BY created_at DESC, id DESC
         LIMIT ?2 OFFSET ?3",
    )
    .bind(user_id)
    .bind(limit)
    .bind((page - 1) * limit)
    .fetch_all(pool)
    .await?;
    Ok(OrderPage::new(orders, total, page, limit))
}

/// All orders (privileged view), optionally filtered by status.
pub async fn list_all(
    pool: &SqlitePool,
    status: Option<OrderStatus>,
    page: i64,
    limit: i64,
) -> AppResult<OrderPage> {
    let (total, orders) = match status {
        Some(status) => {
            let total: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = ?1")
                    .bind(status)
                    .fetch_one(pool)
                    .await?;
            let orders = sqlx::query_as::<_, Order>(
                "SELECT * FROM orders WHERE status = ?1
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?2 OFFSET ?3",
            )
            .bind(status)
            .bind(limit)
            .bind((page - 1) * limit)
            .fetch_all(pool)
            .await?;
            (total, orders)
        }
        None => {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
                .fetch_one(pool)
                .await?;
            let orders = sqlx::query_as::<_, Order>(
                "SELECT * FROM orders
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?1 OFFSET ?2",
            )
            .bind(limit)
            .bind((page - 1) * limit)
            .fetch_all(pool)
            .await?;
            (total, orders)
        }
    };
    Ok(OrderPage::new(orders, total, page, limit))
}

/// Insert a freshly constructed order. Runs on the caller's connection so
/// checkout can include it in its transaction.
pub async fn insert(conn: &mut SqliteConnection, order: &Order) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO orders (
            id, order_number, user_id, status, subtotal, delivery_fee, total_amount,
            shipping_address, shipping_city, shipping_postal_code, shipping_phone,
            payment_method, payment_url, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
    )
    .bind(order.id)
    .bind(&order.order_number)
    .bind(&order.user_id)
    .bind(order.status)
    .bind(order.subtotal)
    .bind(order.delivery_fee)
    .bind(order.total_amount)
    .bind(&order.shipping_address)
    .bind(&order.shipping_city)
    .bind(&order.shipping_postal_code)
    .bind(&order.shipping_phone)
    .bind(order.payment_method)
    .bind(&order.payment_url)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Insert one frozen order line (checkout transaction).
pub async fn insert_item(conn: &mut SqliteConnection, item: &OrderItem) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO order_items (id, order_id, product_id, product_name, quantity, unit_price)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(item.id)
    .bind(item.order_id)
    .bind(item.product_id)
    .bind(&item.product_name)
    .bind(item.quantity)
    .bind(item.unit_price)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Compare-and-swap status transition: applies only while the order is
/// still in `from`. Returns `false` when a concurrent transition won.
pub async fn transition_status(
    pool: &SqlitePool,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> AppResult<bool> {
    let result = sqlx::query(
        "UPDATE orders SET status = ?2, updated_at = ?3 WHERE id = ?1 AND status = ?4",
    )
    .bind(id)
    .bind(to)
    .bind(now_millis())
    .bind(from)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Store the gateway redirect URL. Guarded on PENDING so a session created
/// for an already-progressed order is never recorded.
pub async fn set_payment_url(pool: &SqlitePool, id: i64, url: &str) -> AppResult<bool> {
    let result = sqlx::query(
        "UPDATE orders SET payment_url = ?2, updated_at = ?3
         WHERE id = ?1 AND status = ?4",
    )
    .bind(id)
    .bind(url)
    .bind(now_millis())
    .bind(OrderStatus::Pending)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
