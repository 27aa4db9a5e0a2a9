//! Inbound gateway notification mapping
//!
//! The gateway reports its own transaction vocabulary; only the values
//! below are meaningful here. Anything else is rejected outright, since
//! defaulting an unknown value would mask integration bugs as orders
//! parked in PENDING forever.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::OrderStatus;

/// Map a gateway `transaction_status` onto an order status.
pub fn map_transaction_status(raw: &str) -> AppResult<OrderStatus> {
    match raw {
        "settlement" => Ok(OrderStatus::Paid),
        "cancel" | "deny" | "expire" => Ok(OrderStatus::Cancelled),
        other => Err(AppError::with_message(
            ErrorCode::PaymentUnknownStatus,
            format!("Unrecognized transaction status: {other}"),
        )),
    }
}
