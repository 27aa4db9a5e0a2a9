//! Shared test fixtures
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;

use shared::error::AppResult;
use shared::models::{
    CheckoutItem, CheckoutRequest, Order, PaymentMethod, Product, ProductCreate, Role,
};
use store_server::db::{DbService, products};
use store_server::payment::PaymentGateway;
use store_server::{AppState, UserIdentity};

/// A pool over a throwaway on-disk database (WAL needs a real file).
/// Keep the struct alive for the duration of the test.
pub struct TestDb {
    pub pool: SqlitePool,
    _dir: tempfile::TempDir,
}

pub async fn test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("store-test.db");
    let db = DbService::new(path.to_str().expect("utf-8 temp path"))
        .await
        .expect("open test database");
    TestDb {
        pool: db.pool,
        _dir: dir,
    }
}

/// Gateway stub returning a fixed redirect URL.
pub struct MockGateway;

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_transaction(&self, order: &Order) -> AppResult<String> {
        Ok(format!("https://pay.test/redirect/{}", order.order_number))
    }
}

pub fn test_state(pool: SqlitePool) -> AppState {
    AppState::with_parts(pool, "test-secret", 15_000, Arc::new(MockGateway))
}

pub fn user(user_id: &str) -> UserIdentity {
    UserIdentity {
        user_id: user_id.to_string(),
        role: Role::User,
    }
}

pub fn admin() -> UserIdentity {
    UserIdentity {
        user_id: "staff-1".to_string(),
        role: Role::Admin,
    }
}

pub async fn seed_product(pool: &SqlitePool, name: &str, price: i64, stock: i64) -> Product {
    products::insert(
        pool,
        ProductCreate {
            name: name.to_string(),
            price,
            stock,
            is_active: true,
        },
    )
    .await
    .expect("seed product")
}

pub async fn seed_inactive_product(pool: &SqlitePool, name: &str) -> Product {
    products::insert(
        pool,
        ProductCreate {
            name: name.to_string(),
            price: 5_000,
            stock: 10,
            is_active: false,
        },
    )
    .await
    .expect("seed inactive product")
}

pub fn checkout_request(items: Vec<(i64, i64)>) -> CheckoutRequest {
    CheckoutRequest {
        items: items
            .into_iter()
            .map(|(product_id, quantity)| CheckoutItem {
                product_id,
                quantity,
            })
            .collect(),
        shipping_address: "Jl. Sudirman No. 10, Jakarta".into(),
        shipping_city: "Jakarta".into(),
        shipping_postal_code: "12190".into(),
        shipping_phone: "081234567890".into(),
        payment_method: PaymentMethod::BankTransfer,
    }
}
