//! Storefront backend
//!
//! Request-per-call HTTP server around the cart → checkout → order
//! lifecycle pipeline:
//!
//! - **Cart** (`db::carts`): mutable per-user cart with price snapshots
//! - **Checkout** (`checkout`): the atomic cart-to-order conversion
//! - **Orders** (`db::orders` + `shared::models::OrderStatus`): immutable
//!   orders moved through a role-gated status state machine
//! - **Payment bridge** (`payment`): gateway session creation and inbound
//!   status notifications
//! - **Auth** (`auth`): bearer-token identity and the authorization policy
//!
//! All components are constructed explicitly and handed around through
//! [`AppState`]; there is no process-wide singleton state.

pub mod api;
pub mod auth;
pub mod checkout;
pub mod config;
pub mod db;
pub mod payment;
pub mod state;
pub mod utils;

pub use auth::{UserIdentity, create_token};
pub use config::Config;
pub use state::AppState;

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
