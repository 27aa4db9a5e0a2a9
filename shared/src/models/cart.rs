//! Cart Model
//!
//! One cart per user, created lazily on first access and never deleted.
//! Lines are unique per `(cart_id, product_id)`; a line with quantity 0 is
//! deleted, not stored. Totals are always derived from the lines, never
//! stored independently.

use serde::{Deserialize, Serialize};

/// Cart entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Cart {
    pub id: i64,
    pub user_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A cart line joined with its product's display data.
///
/// `price_snapshot` is the product price captured when the line was added or
/// last re-added; `line_total = price_snapshot × quantity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartLine {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub price_snapshot: i64,
    pub line_total: i64,
}

/// Derived cart totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: i64,
    pub item_count: i64,
    /// Fixed delivery fee, waived while the cart is empty
    pub delivery_fee: i64,
    pub total: i64,
}

/// Cart with lines and derived totals, the GET /api/cart payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSummary {
    pub id: i64,
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
}

impl CartSummary {
    /// Assemble a summary from lines, recomputing every derived value.
    ///
    /// The delivery fee is display-only here (checkout recomputes its own):
    /// it is waived when the subtotal is 0.
    pub fn assemble(cart_id: i64, items: Vec<CartLine>, delivery_fee: i64) -> Self {
        let subtotal: i64 = items.iter().map(|l| l.line_total).sum();
        let item_count: i64 = items.iter().map(|l| l.quantity).sum();
        let fee = if subtotal == 0 { 0 } else { delivery_fee };
        Self {
            id: cart_id,
            items,
            totals: CartTotals {
                subtotal,
                item_count,
                delivery_fee: fee,
                total: subtotal + fee,
            },
        }
    }
}

/// POST /api/cart/items payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: i64,
    pub quantity: i64,
}

/// PATCH /api/cart/items/{id} payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i64, price: i64, qty: i64) -> CartLine {
        CartLine {
            id,
            product_id: id,
            product_name: format!("Product {id}"),
            quantity: qty,
            price_snapshot: price,
            line_total: price * qty,
        }
    }

    #[test]
    fn test_summary_totals() {
        let summary = CartSummary::assemble(1, vec![line(1, 10_000, 2), line(2, 5_000, 1)], 15_000);
        assert_eq!(summary.totals.subtotal, 25_000);
        assert_eq!(summary.totals.item_count, 3);
        assert_eq!(summary.totals.delivery_fee, 15_000);
        assert_eq!(summary.totals.total, 40_000);
    }

    #[test]
    fn test_empty_cart_waives_delivery_fee() {
        let summary = CartSummary::assemble(1, vec![], 15_000);
        assert_eq!(summary.totals.subtotal, 0);
        assert_eq!(summary.totals.item_count, 0);
        assert_eq!(summary.totals.delivery_fee, 0);
        assert_eq!(summary.totals.total, 0);
    }
}
