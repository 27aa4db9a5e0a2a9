//! Product Model
//!
//! Backing store of the product snapshot interface: checkout and cart
//! operations only ever read `{price, is_active, stock}` live from here.
//! Catalog management itself is outside this backend.

use serde::{Deserialize, Serialize};

/// Product entity. Prices are integer minor units (whole rupiah).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub stock: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload (seeding / fixtures)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: i64,
    pub stock: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
