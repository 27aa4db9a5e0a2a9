//! Checkout Engine
//!
//! Converts a checkout request into an immutable order. Validation is
//! fail-fast in a fixed order: request shape, shipping fields, then each
//! item revalidated against the *live* product row. An earlier cart
//! snapshot is never trusted for price or stock.
//!
//! The mutation runs as one transaction: a compare-and-swap stock decrement
//! per item, the frozen order insert, and the cart clear. A failed
//! decrement means a concurrent checkout consumed the stock first; the
//! transaction is dropped uncommitted, so no partial decrement and no
//! partial order can ever be observed.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CheckoutRequest, Order, OrderDetail, OrderItem, OrderStatus, Product};
use shared::util::{next_id, now_millis};
use sqlx::SqlitePool;
use validator::Validate;

use crate::db::{orders, products};

/// Run the checkout pipeline for one user.
pub async fn checkout(
    pool: &SqlitePool,
    user_id: &str,
    req: &CheckoutRequest,
    delivery_fee: i64,
) -> AppResult<OrderDetail> {
    req.validate().map_err(validation_error)?;

    // Revalidate every item against the live product row, in request order.
    let mut priced: Vec<(Product, i64)> = Vec::with_capacity(req.items.len());
    for item in &req.items {
        let product = products::require(pool, item.product_id).await?;
        if !product.is_active {
            return Err(AppError::with_message(
                ErrorCode::ProductInactive,
                format!("Product {} is not active", product.name),
            ));
        }
        if product.stock < item.quantity {
            return Err(AppError::out_of_stock(product.name, product.stock));
        }
        priced.push((product, item.quantity));
    }

    let subtotal: i64 = priced.iter().map(|(p, q)| p.price * q).sum();
    let total_amount = subtotal + delivery_fee;

    let now = now_millis();
    let order_id = next_id();
    let order = Order {
        id: order_id,
        order_number: order_number(order_id, now),
        user_id: user_id.to_string(),
        status: OrderStatus::Pending,
        subtotal,
        delivery_fee,
        total_amount,
        shipping_address: req.shipping_address.clone(),
        shipping_city: req.shipping_city.clone(),
        shipping_postal_code: req.shipping_postal_code.clone(),
        shipping_phone: req.shipping_phone.clone(),
        payment_method: req.payment_method,
        payment_url: None,
        created_at: now,
        updated_at: now,
    };

    let mut tx = pool.begin().await?;

    for (product, quantity) in &priced {
        let decremented = products::decrement_stock(&mut tx, product.id, *quantity, now).await?;
        if !decremented {
            // Lost the race since the read above; dropping the transaction
            // rolls back every decrement already applied.
            return Err(AppError::with_message(
                ErrorCode::ProductOutOfStock,
                format!("Insufficient stock for {}", product.name),
            ));
        }
    }

    orders::insert(&mut tx, &order).await?;
    let mut items = Vec::with_capacity(priced.len());
    for (product, quantity) in &priced {
        let item = OrderItem {
            id: next_id(),
            order_id,
            product_id: product.id,
            product_name: product.name.clone(),
            quantity: *quantity,
            unit_price: product.price,
        };
        orders::insert_item(&mut tx, &item).await?;
        items.push(item);
    }

    // The cart is consumed by the same commit that creates the order.
    sqlx::query(
        "DELETE FROM cart_items
         WHERE cart_id IN (SELECT id FROM carts WHERE user_id = ?1)",
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        order_number = %order.order_number,
        user_id = %user_id,
        total = total_amount,
        "Order created"
    );

    Ok(OrderDetail { order, items })
}

/// Externally displayable order number: date + snowflake id.
fn order_number(order_id: i64, now_ms: i64) -> String {
    let date = chrono::DateTime::from_timestamp_millis(now_ms)
        .unwrap_or_default()
        .format("%Y%m%d");
    format!("ORD-{date}-{order_id}")
}

/// Flatten validator output into the first useful message.
fn validation_error(errors: validator::ValidationErrors) -> AppError {
    let message = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid checkout data".to_string());
    AppError::validation(message)
}
