//! Payment types at the gateway boundary

use serde::{Deserialize, Serialize};

/// Accepted payment methods, the fixed set offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentMethod {
    CreditCard,
    Qris,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::Qris => "QRIS",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
        }
    }
}

/// Inbound gateway notification payload.
///
/// `transaction_status` uses the gateway's own vocabulary and is mapped to
/// an order status by the notification handler; unrecognized values are
/// rejected there, never defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentNotification {
    pub order_id: i64,
    pub transaction_status: String,
}

/// Response of POST /api/payments/{order_id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    pub order_id: i64,
    pub payment_url: String,
}
