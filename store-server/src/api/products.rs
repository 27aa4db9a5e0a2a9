//! Product read API
//!
//! Storefront product lookup only; catalog management lives elsewhere.

use axum::extract::{Path, State};

use shared::error::{ApiResponse, AppResult};
use shared::models::Product;

use crate::db::products;
use crate::state::AppState;

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Product>> {
    let product = products::require(&state.pool, id).await?;
    Ok(ApiResponse::success(product))
}
