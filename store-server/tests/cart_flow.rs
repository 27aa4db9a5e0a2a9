//! Cart store behavior: lazy creation, summing merge, live stock checks,
//! quantity updates, clear semantics, derived totals.

mod common;

use common::{seed_inactive_product, seed_product, test_db};
use shared::error::ErrorCode;
use store_server::db::carts;

#[tokio::test]
async fn get_or_create_is_idempotent() {
    let db = test_db().await;

    let first = carts::get_or_create(&db.pool, "user-1").await.unwrap();
    let second = carts::get_or_create(&db.pool, "user-1").await.unwrap();
    assert_eq!(first.id, second.id);

    let other = carts::get_or_create(&db.pool, "user-2").await.unwrap();
    assert_ne!(first.id, other.id);
}

#[tokio::test]
async fn adding_same_product_twice_sums_quantities_and_refreshes_snapshot() {
    let db = test_db().await;
    let product = seed_product(&db.pool, "Kopi Gayo 250g", 10_000, 10).await;

    let line = carts::add_line(&db.pool, "user-1", product.id, 3).await.unwrap();
    assert_eq!(line.quantity, 3);
    assert_eq!(line.price_snapshot, 10_000);

    // Price changes between the two adds; the snapshot must follow it.
    sqlx::query("UPDATE products SET price = 12000 WHERE id = ?1")
        .bind(product.id)
        .execute(&db.pool)
        .await
        .unwrap();

    let merged = carts::add_line(&db.pool, "user-1", product.id, 2).await.unwrap();
    assert_eq!(merged.quantity, 5);
    assert_eq!(merged.price_snapshot, 12_000);
    assert_eq!(merged.line_total, 60_000);

    // Still a single line for the product.
    let summary = carts::summary(&db.pool, "user-1", 15_000).await.unwrap();
    assert_eq!(summary.items.len(), 1);
    assert_eq!(summary.totals.item_count, 5);
}

#[tokio::test]
async fn add_line_rejects_bad_input() {
    let db = test_db().await;
    let product = seed_product(&db.pool, "Teh Melati", 8_000, 4).await;
    let inactive = seed_inactive_product(&db.pool, "Produk Lama").await;

    let err = carts::add_line(&db.pool, "user-1", 999_999, 1).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductNotFound);

    let err = carts::add_line(&db.pool, "user-1", inactive.id, 1).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductInactive);

    let err = carts::add_line(&db.pool, "user-1", product.id, 0).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::CartQuantityInvalid);

    let err = carts::add_line(&db.pool, "user-1", product.id, 5).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductOutOfStock);

    // Nothing landed in the cart.
    let summary = carts::summary(&db.pool, "user-1", 15_000).await.unwrap();
    assert!(summary.items.is_empty());
}

#[tokio::test]
async fn set_line_quantity_updates_and_zero_removes() {
    let db = test_db().await;
    let product = seed_product(&db.pool, "Gula Aren", 6_000, 10).await;
    let line = carts::add_line(&db.pool, "user-1", product.id, 2).await.unwrap();

    let updated = carts::set_line_quantity(&db.pool, "user-1", line.id, 4)
        .await
        .unwrap()
        .expect("line still present");
    assert_eq!(updated.quantity, 4);

    let err = carts::set_line_quantity(&db.pool, "user-1", line.id, -1)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CartQuantityInvalid);

    let err = carts::set_line_quantity(&db.pool, "user-1", line.id, 11)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductOutOfStock);

    // Quantity 0 deletes the line, a non-error terminal case.
    let removed = carts::set_line_quantity(&db.pool, "user-1", line.id, 0)
        .await
        .unwrap();
    assert!(removed.is_none());
    let summary = carts::summary(&db.pool, "user-1", 15_000).await.unwrap();
    assert!(summary.items.is_empty());
}

#[tokio::test]
async fn lines_are_scoped_to_the_owning_cart() {
    let db = test_db().await;
    let product = seed_product(&db.pool, "Keripik Pisang", 7_500, 10).await;
    let line = carts::add_line(&db.pool, "user-1", product.id, 1).await.unwrap();

    // Another user cannot see or touch the line.
    let err = carts::set_line_quantity(&db.pool, "user-2", line.id, 3)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CartItemNotFound);

    let err = carts::remove_line(&db.pool, "user-2", line.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::CartItemNotFound);

    // The owner still has it, untouched.
    let summary = carts::summary(&db.pool, "user-1", 15_000).await.unwrap();
    assert_eq!(summary.items.len(), 1);
    assert_eq!(summary.items[0].quantity, 1);
}

#[tokio::test]
async fn clear_errors_on_already_empty_cart() {
    let db = test_db().await;
    let product = seed_product(&db.pool, "Madu Hutan", 25_000, 5).await;
    carts::add_line(&db.pool, "user-1", product.id, 2).await.unwrap();

    carts::clear(&db.pool, "user-1").await.unwrap();
    let summary = carts::summary(&db.pool, "user-1", 15_000).await.unwrap();
    assert!(summary.items.is_empty());

    let err = carts::clear(&db.pool, "user-1").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::CartEmpty);
}

#[tokio::test]
async fn summary_totals_follow_the_lines() {
    let db = test_db().await;
    let coffee = seed_product(&db.pool, "Kopi Gayo 250g", 10_000, 10).await;
    let tea = seed_product(&db.pool, "Teh Melati", 5_000, 10).await;

    // Empty cart: fee waived.
    let summary = carts::summary(&db.pool, "user-1", 15_000).await.unwrap();
    assert_eq!(summary.totals.delivery_fee, 0);
    assert_eq!(summary.totals.total, 0);

    carts::add_line(&db.pool, "user-1", coffee.id, 2).await.unwrap();
    carts::add_line(&db.pool, "user-1", tea.id, 1).await.unwrap();

    let summary = carts::summary(&db.pool, "user-1", 15_000).await.unwrap();
    assert_eq!(summary.totals.subtotal, 25_000);
    assert_eq!(summary.totals.item_count, 3);
    assert_eq!(summary.totals.delivery_fee, 15_000);
    assert_eq!(summary.totals.total, 40_000);
}
