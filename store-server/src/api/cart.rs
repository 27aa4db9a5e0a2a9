//! Cart API handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use shared::error::{ApiResponse, AppResult};
use shared::models::{AddToCartRequest, CartLine, CartSummary, UpdateCartItemRequest};

use crate::auth::UserIdentity;
use crate::db::carts;
use crate::state::AppState;

/// GET /api/cart: the caller's cart, created lazily on first access.
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> AppResult<ApiResponse<CartSummary>> {
    let summary = carts::summary(&state.pool, &identity.user_id, state.delivery_fee).await?;
    Ok(ApiResponse::success_with_message("Cart loaded", summary))
}

/// POST /api/cart/items
pub async fn add_item(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(req): Json<AddToCartRequest>,
) -> AppResult<ApiResponse<CartLine>> {
    let line = carts::add_line(&state.pool, &identity.user_id, req.product_id, req.quantity).await?;
    Ok(ApiResponse::success_with_message(
        "Product added to cart",
        line,
    ))
}

/// PATCH /api/cart/items/{id}: quantity 0 removes the line.
pub async fn update_item(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(line_id): Path<i64>,
    Json(req): Json<UpdateCartItemRequest>,
) -> AppResult<ApiResponse<Option<CartLine>>> {
    let updated =
        carts::set_line_quantity(&state.pool, &identity.user_id, line_id, req.quantity).await?;
    let message = if updated.is_some() {
        "Item quantity updated"
    } else {
        "Item removed from cart"
    };
    Ok(ApiResponse::success_with_message(message, updated))
}

/// DELETE /api/cart/items/{id}
pub async fn remove_item(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(line_id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    carts::remove_line(&state.pool, &identity.user_id, line_id).await?;
    Ok(ApiResponse::success_with_message(
        "Item removed from cart",
        (),
    ))
}

/// DELETE /api/cart
pub async fn clear_cart(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> AppResult<ApiResponse<()>> {
    carts::clear(&state.pool, &identity.user_id).await?;
    Ok(ApiResponse::success_with_message("Cart cleared", ()))
}
