//! Order Model and lifecycle state machine
//!
//! Orders are created exclusively by checkout and never hard-deleted;
//! cancellation is a status, not a removal. After creation only `status`,
//! `payment_url` and `updated_at` ever change; the item lines and
//! `total_amount` are frozen at checkout time.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::payment::PaymentMethod;

/// Order lifecycle status.
///
/// Forward path: `PENDING → PROCESSING → PAID → SHIPPED → DELIVERED`.
/// `CANCELLED` is reachable from `PENDING` and `PROCESSING` only;
/// cancellation after payment belongs to a refund flow this backend does
/// not implement. `CANCELLED` and `DELIVERED` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    Pending,
    Processing,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All states, in forward-path order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Paid,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Whether `next` is directly reachable from `self`.
    ///
    /// This is the complete adjacency table; everything not listed here is
    /// an illegal transition regardless of who asks.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, Paid)
                | (Paid, Shipped)
                | (Shipped, Delivered)
                | (Pending, Cancelled)
                | (Processing, Cancelled)
        )
    }

    /// Terminal states have no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// States from which cancellation is still possible.
    pub fn is_cancellable(&self) -> bool {
        self.can_transition_to(OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "PROCESSING" => Ok(OrderStatus::Processing),
            "PAID" => Ok(OrderStatus::Paid),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub user_id: String,
    pub status: OrderStatus,
    pub subtotal: i64,
    pub delivery_fee: i64,
    pub total_amount: i64,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_postal_code: String,
    pub shipping_phone: String,
    pub payment_method: PaymentMethod,
    pub payment_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Frozen order line: a copy of the product's name and unit price taken
/// at checkout time, never re-derived from the live catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: i64,
}

/// Order with its frozen item lines, the GET /api/orders/{id} payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// One page of an order listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

impl OrderPage {
    pub fn new(orders: Vec<Order>, total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
        Self {
            orders,
            total,
            page,
            total_pages,
        }
    }
}

/// One requested checkout item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutItem {
    pub product_id: i64,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
}

/// POST /api/orders payload: the checkout request.
///
/// Field bounds mirror the storefront checkout form contract.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(
        length(min = 1, message = "At least one item is required"),
        nested
    )]
    pub items: Vec<CheckoutItem>,
    #[validate(length(min = 10, max = 500, message = "Shipping address must be at least 10 characters"))]
    pub shipping_address: String,
    #[validate(length(min = 2, max = 100, message = "City is required"))]
    pub shipping_city: String,
    #[validate(length(min = 3, max = 20, message = "Postal code is required"))]
    pub shipping_postal_code: String,
    #[validate(length(min = 8, max = 32, message = "Phone number is required"))]
    pub shipping_phone: String,
    pub payment_method: PaymentMethod,
}

/// PATCH /api/orders/{id}/status payload (privileged).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}
