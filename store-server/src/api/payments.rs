//! Payment API handlers
//!
//! Session creation is owner-only and never changes order status; status
//! changes come back asynchronously through the public notification
//! webhook, which is idempotent under replay.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderStatus, PaymentNotification, PaymentSession};

use crate::auth::UserIdentity;
use crate::db::orders;
use crate::payment::map_transaction_status;
use crate::state::AppState;

/// POST /api/payments/{order_id}: create a gateway transaction and store
/// the redirect URL on the order.
pub async fn create_session(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(order_id): Path<i64>,
) -> AppResult<ApiResponse<PaymentSession>> {
    let order = orders::require(&state.pool, order_id).await?;

    if order.user_id != identity.user_id {
        return Err(AppError::permission_denied(
            "You do not have access to this order",
        ));
    }
    if order.status != OrderStatus::Pending {
        return Err(AppError::with_message(
            ErrorCode::PaymentNotPending,
            "Order has already been paid or cancelled",
        ));
    }

    let payment_url = state.gateway.create_transaction(&order).await?;

    // Guarded on PENDING: if the order progressed while the gateway call
    // was in flight, the URL is discarded rather than written stale.
    let stored = orders::set_payment_url(&state.pool, order_id, &payment_url).await?;
    if !stored {
        return Err(AppError::with_message(
            ErrorCode::PaymentNotPending,
            "Order has already been paid or cancelled",
        ));
    }

    Ok(ApiResponse::success_with_message(
        "Payment session created",
        PaymentSession {
            order_id,
            payment_url,
        },
    ))
}

/// POST /api/payments/notification: inbound gateway status callback
/// (public route; the gateway does not authenticate as a user).
pub async fn handle_notification(
    State(state): State<AppState>,
    Json(notification): Json<PaymentNotification>,
) -> AppResult<ApiResponse<Order>> {
    let target = map_transaction_status(&notification.transaction_status)?;
    let order = orders::require(&state.pool, notification.order_id).await?;

    // Replay of an already-applied notification: same status, no side
    // effects to repeat.
    if order.status == target {
        return Ok(ApiResponse::success_with_message(
            "Notification already applied",
            order,
        ));
    }

    // The gateway may settle or void an order that is awaiting payment or
    // being processed; anything later is a real conflict.
    if !matches!(
        order.status,
        OrderStatus::Pending | OrderStatus::Processing
    ) {
        return Err(AppError::invalid_transition(
            order.status.as_str(),
            target.as_str(),
        ));
    }

    let applied = orders::transition_status(&state.pool, order.id, order.status, target).await?;
    if !applied {
        // Lost a race, possibly against a duplicate of this very
        // notification. If the order now carries the target status the
        // replay contract holds; otherwise report the conflict.
        let current = orders::require(&state.pool, order.id).await?;
        if current.status == target {
            return Ok(ApiResponse::success_with_message(
                "Notification already applied",
                current,
            ));
        }
        return Err(AppError::invalid_transition(
            current.status.as_str(),
            target.as_str(),
        ));
    }

    tracing::info!(
        order_id = order.id,
        transaction_status = %notification.transaction_status,
        status = %target,
        "Payment notification applied"
    );

    let updated = orders::require(&state.pool, order.id).await?;
    Ok(ApiResponse::success_with_message(
        "Order status updated from payment notification",
        updated,
    ))
}
