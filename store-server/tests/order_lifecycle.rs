//! Order lifecycle: role-gated transitions, visibility, and listing.
//!
//! Exercises the HTTP handlers directly; they are plain async functions
//! over extractor values.

mod common;

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use common::{admin, checkout_request, seed_product, test_db, test_state, user};
use shared::error::ErrorCode;
use shared::models::{Order, OrderStatus, UpdateOrderStatusRequest};
use store_server::api::orders::{self as orders_api, ListQuery};
use store_server::checkout::checkout;
use store_server::db::orders;
use store_server::state::AppState;

async fn place_order(state: &AppState, user_id: &str) -> Order {
    let product = seed_product(&state.pool, "Kopi Gayo 250g", 10_000, 100).await;
    checkout(
        &state.pool,
        user_id,
        &checkout_request(vec![(product.id, 1)]),
        state.delivery_fee,
    )
    .await
    .unwrap()
    .order
}

async fn set_status(
    state: &AppState,
    identity: &store_server::UserIdentity,
    order_id: i64,
    status: OrderStatus,
) -> Result<Order, shared::error::AppError> {
    orders_api::update_status(
        State(state.clone()),
        Extension(identity.clone()),
        Path(order_id),
        Json(UpdateOrderStatusRequest { status }),
    )
    .await
    .map(|resp| resp.data.unwrap())
}

#[tokio::test]
async fn admin_moves_order_through_the_forward_path() {
    let db = test_db().await;
    let state = test_state(db.pool.clone());
    let order = place_order(&state, "user-1").await;
    let staff = admin();

    for status in [
        OrderStatus::Processing,
        OrderStatus::Paid,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ] {
        let updated = set_status(&state, &staff, order.id, status).await.unwrap();
        assert_eq!(updated.status, status);
    }

    // Terminal: nothing leaves DELIVERED.
    let err = set_status(&state, &staff, order.id, OrderStatus::Cancelled)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderInvalidTransition);
}

#[tokio::test]
async fn skipping_states_is_rejected_even_for_admin() {
    let db = test_db().await;
    let state = test_state(db.pool.clone());
    let order = place_order(&state, "user-1").await;

    let err = set_status(&state, &admin(), order.id, OrderStatus::Shipped)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderInvalidTransition);

    // The order did not move.
    let current = orders::require(&state.pool, order.id).await.unwrap();
    assert_eq!(current.status, OrderStatus::Pending);
}

#[tokio::test]
async fn status_endpoint_requires_admin() {
    let db = test_db().await;
    let state = test_state(db.pool.clone());
    let order = place_order(&state, "user-1").await;

    let err = set_status(&state, &user("user-1"), order.id, OrderStatus::Processing)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AdminRequired);
}

#[tokio::test]
async fn owner_cancels_pending_order() {
    let db = test_db().await;
    let state = test_state(db.pool.clone());
    let order = place_order(&state, "user-1").await;

    let resp = orders_api::cancel(
        State(state.clone()),
        Extension(user("user-1")),
        Path(order.id),
    )
    .await
    .unwrap();
    assert_eq!(resp.data.unwrap().status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn owner_cannot_cancel_after_payment() {
    let db = test_db().await;
    let state = test_state(db.pool.clone());
    let order = place_order(&state, "user-1").await;
    let staff = admin();
    set_status(&state, &staff, order.id, OrderStatus::Processing).await.unwrap();
    set_status(&state, &staff, order.id, OrderStatus::Paid).await.unwrap();

    let err = orders_api::cancel(
        State(state.clone()),
        Extension(user("user-1")),
        Path(order.id),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderInvalidTransition);

    let current = orders::require(&state.pool, order.id).await.unwrap();
    assert_eq!(current.status, OrderStatus::Paid);
}

#[tokio::test]
async fn strangers_cannot_read_or_cancel_foreign_orders() {
    let db = test_db().await;
    let state = test_state(db.pool.clone());
    let order = place_order(&state, "user-1").await;

    let err = orders_api::get_detail(
        State(state.clone()),
        Extension(user("user-2")),
        Path(order.id),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    let err = orders_api::cancel(
        State(state.clone()),
        Extension(user("user-2")),
        Path(order.id),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    // The order is unchanged.
    let current = orders::require(&state.pool, order.id).await.unwrap();
    assert_eq!(current.status, OrderStatus::Pending);

    // Admin may read it.
    let resp = orders_api::get_detail(
        State(state.clone()),
        Extension(admin()),
        Path(order.id),
    )
    .await
    .unwrap();
    assert_eq!(resp.data.unwrap().order.id, order.id);
}

fn list_query(page: Option<i64>, limit: Option<i64>, status: Option<&str>) -> Query<ListQuery> {
    Query(ListQuery {
        page,
        limit,
        status: status.map(str::to_string),
    })
}

#[tokio::test]
async fn listing_scopes_pages_and_filters() {
    let db = test_db().await;
    let state = test_state(db.pool.clone());
    let staff = admin();

    for _ in 0..3 {
        place_order(&state, "user-1").await;
    }
    let foreign = place_order(&state, "user-2").await;
    set_status(&state, &staff, foreign.id, OrderStatus::Processing)
        .await
        .unwrap();

    // A user sees only their own orders.
    let resp = orders_api::list(
        State(state.clone()),
        Extension(user("user-1")),
        list_query(None, None, None),
    )
    .await
    .unwrap();
    let page = resp.data.unwrap();
    assert_eq!(page.total, 3);
    assert!(page.orders.iter().all(|o| o.user_id == "user-1"));

    // Admin sees everything, with pagination metadata.
    let resp = orders_api::list(
        State(state.clone()),
        Extension(staff.clone()),
        list_query(Some(1), Some(2), None),
    )
    .await
    .unwrap();
    let page = resp.data.unwrap();
    assert_eq!(page.total, 4);
    assert_eq!(page.orders.len(), 2);
    assert_eq!(page.total_pages, 2);

    // Status filter.
    let resp = orders_api::list(
        State(state.clone()),
        Extension(staff.clone()),
        list_query(None, None, Some("PROCESSING")),
    )
    .await
    .unwrap();
    let page = resp.data.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.orders[0].id, foreign.id);

    // "ALL" disables the filter; unknown values are rejected.
    let resp = orders_api::list(
        State(state.clone()),
        Extension(staff.clone()),
        list_query(None, None, Some("ALL")),
    )
    .await
    .unwrap();
    assert_eq!(resp.data.unwrap().total, 4);

    let err = orders_api::list(
        State(state.clone()),
        Extension(staff),
        list_query(None, None, Some("REFUNDED")),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderStatusUnknown);
}

#[tokio::test]
async fn order_totals_and_items_are_immutable_through_transitions() {
    let db = test_db().await;
    let state = test_state(db.pool.clone());
    let order = place_order(&state, "user-1").await;
    let staff = admin();

    set_status(&state, &staff, order.id, OrderStatus::Processing).await.unwrap();
    set_status(&state, &staff, order.id, OrderStatus::Paid).await.unwrap();

    let detail = orders::detail(&state.pool, order.id).await.unwrap();
    assert_eq!(detail.order.total_amount, order.total_amount);
    assert_eq!(detail.order.order_number, order.order_number);
    assert_eq!(detail.items.len(), 1);
    assert!(detail.order.updated_at >= order.updated_at);
}
