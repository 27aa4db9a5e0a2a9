//! Order API handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{
    CheckoutRequest, Order, OrderDetail, OrderPage, OrderStatus, UpdateOrderStatusRequest,
};

use crate::auth::{UserIdentity, authorize_transition, ensure_admin, ensure_owner_or_admin};
use crate::checkout;
use crate::db::orders;
use crate::state::AppState;

const USER_PAGE_LIMIT: i64 = 20;
const ADMIN_PAGE_LIMIT: i64 = 100;

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
}

/// GET /api/orders: own orders for users, all orders for admin
/// (optionally filtered by status).
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<OrderPage>> {
    let page = query.page.unwrap_or(1).max(1);

    let result = if identity.role.is_admin() {
        let limit = query.limit.unwrap_or(ADMIN_PAGE_LIMIT).clamp(1, ADMIN_PAGE_LIMIT);
        let status = match query.status.as_deref() {
            None | Some("ALL") => None,
            Some(raw) => Some(raw.parse::<OrderStatus>().map_err(|_| {
                AppError::with_message(
                    ErrorCode::OrderStatusUnknown,
                    format!("Unknown order status: {raw}"),
                )
            })?),
        };
        orders::list_all(&state.pool, status, page, limit).await?
    } else {
        let limit = query.limit.unwrap_or(USER_PAGE_LIMIT).clamp(1, ADMIN_PAGE_LIMIT);
        orders::list_for_user(&state.pool, &identity.user_id, page, limit).await?
    };

    Ok(ApiResponse::success_with_message("Orders retrieved", result))
}

/// GET /api/orders/{id}
pub async fn get_detail(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<OrderDetail>> {
    let detail = orders::detail(&state.pool, id).await?;
    ensure_owner_or_admin(&identity, &detail.order.user_id)?;
    Ok(ApiResponse::success_with_message(
        "Order detail retrieved",
        detail,
    ))
}

/// POST /api/orders: checkout.
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<ApiResponse<OrderDetail>> {
    let detail =
        checkout::checkout(&state.pool, &identity.user_id, &req, state.delivery_fee).await?;
    Ok(ApiResponse::success_with_message("Order created", detail))
}

/// PATCH /api/orders/{id}/status: privileged status transition.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(&identity)?;
    let order = transition(&state, &identity, id, req.status).await?;
    Ok(ApiResponse::success_with_message(
        "Order status updated",
        order,
    ))
}

/// POST /api/orders/{id}/cancel: owner (early states) or admin.
pub async fn cancel(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Order>> {
    let order = transition(&state, &identity, id, OrderStatus::Cancelled).await?;
    Ok(ApiResponse::success_with_message("Order cancelled", order))
}

/// Shared transition path: authorize against the current status, then
/// apply with a compare-and-swap so a concurrent transition cannot be
/// silently overwritten.
async fn transition(
    state: &AppState,
    identity: &UserIdentity,
    id: i64,
    target: OrderStatus,
) -> AppResult<Order> {
    let order = orders::require(&state.pool, id).await?;
    authorize_transition(identity, &order, target)?;

    let applied = orders::transition_status(&state.pool, id, order.status, target).await?;
    if !applied {
        // Someone else moved the order between our read and the update.
        let current = orders::require(&state.pool, id).await?;
        return Err(AppError::invalid_transition(
            current.status.as_str(),
            target.as_str(),
        ));
    }

    tracing::info!(
        order_id = id,
        from = %order.status,
        to = %target,
        by = %identity.user_id,
        "Order status changed"
    );

    orders::require(&state.pool, id).await
}
