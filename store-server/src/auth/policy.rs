//! Authorization policy
//!
//! The single place where caller, resource owner and required capability
//! meet. Handlers never hand-roll role checks.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderStatus};

use super::jwt::UserIdentity;

/// Require the admin role.
pub fn ensure_admin(identity: &UserIdentity) -> AppResult<()> {
    if identity.role.is_admin() {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::AdminRequired))
    }
}

/// Require that the caller owns the resource or is an admin.
pub fn ensure_owner_or_admin(identity: &UserIdentity, owner_user_id: &str) -> AppResult<()> {
    if identity.role.is_admin() || identity.user_id == owner_user_id {
        Ok(())
    } else {
        Err(AppError::permission_denied(
            "You do not have access to this resource",
        ))
    }
}

/// Authorize a requested order status transition.
///
/// Role check first, then state-machine legality: a caller who may not
/// perform a transition at all gets the permission error, not the
/// transition error, so the two failure modes stay distinguishable.
///
/// - The owning user may only request cancellation, and only while the
///   order is still PENDING or PROCESSING.
/// - Admin may request any transition in the adjacency table.
pub fn authorize_transition(
    identity: &UserIdentity,
    order: &Order,
    target: OrderStatus,
) -> AppResult<()> {
    if !identity.role.is_admin() {
        if identity.user_id != order.user_id {
            return Err(AppError::permission_denied(
                "You do not have access to this order",
            ));
        }
        if target != OrderStatus::Cancelled {
            return Err(AppError::permission_denied(
                "Only cancellation can be requested for your own order",
            ));
        }
    }

    if !order.status.can_transition_to(target) {
        return Err(AppError::invalid_transition(
            order.status.as_str(),
            target.as_str(),
        ));
    }

    Ok(())
}
