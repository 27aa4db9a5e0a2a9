//! Application state

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::DbService;
use crate::payment::{PaymentGateway, SnapGateway};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state.
///
/// Built once in `main` (or per test) and cloned into every handler.
/// Components are dependency-injected here instead of living in globals.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT secret for identity token verification
    pub jwt_secret: String,
    /// Flat delivery fee in minor units
    pub delivery_fee: i64,
    /// Payment gateway client
    pub gateway: Arc<dyn PaymentGateway>,
}

impl AppState {
    /// Create a new AppState from configuration
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let db = DbService::new(&config.database_path).await?;
        let gateway = SnapGateway::new(&config.payment_base_url, &config.payment_server_key);

        Ok(Self {
            pool: db.pool,
            jwt_secret: config.jwt_secret.clone(),
            delivery_fee: config.delivery_fee,
            gateway: Arc::new(gateway),
        })
    }

    /// Assemble a state from pre-built parts (tests, embedding).
    pub fn with_parts(
        pool: SqlitePool,
        jwt_secret: impl Into<String>,
        delivery_fee: i64,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            pool,
            jwt_secret: jwt_secret.into(),
            delivery_fee,
            gateway,
        }
    }
}
