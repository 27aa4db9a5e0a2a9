//! API routes
//!
//! Public surface: health, product reads, and the gateway notification
//! webhook. Everything else sits behind the bearer-auth middleware.

pub mod cart;
pub mod health;
pub mod orders;
pub mod payments;
pub mod products;

use axum::routing::{get, patch, post};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::auth_middleware;
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth)
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/products/{id}", get(products::get_by_id))
        .route(
            "/api/payments/notification",
            post(payments::handle_notification),
        );

    // Authenticated routes
    let protected = Router::new()
        .route("/api/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/api/cart/items", post(cart::add_item))
        .route(
            "/api/cart/items/{id}",
            patch(cart::update_item).delete(cart::remove_item),
        )
        .route("/api/orders", get(orders::list).post(orders::create))
        .route("/api/orders/{id}", get(orders::get_detail))
        .route("/api/orders/{id}/cancel", post(orders::cancel))
        .route("/api/orders/{id}/status", patch(orders::update_status))
        .route("/api/payments/{order_id}", post(payments::create_session))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
