//! Payment gateway client

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Order;

/// Boundary to the external payment provider.
///
/// Implementations create a hosted payment transaction for an order and
/// return the redirect URL the customer completes payment at. Payment
/// initiation is not payment confirmation; confirmation arrives later as
/// a notification.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_transaction(&self, order: &Order) -> AppResult<String>;
}

/// Snap-style HTTP gateway client (server key via Basic auth).
pub struct SnapGateway {
    client: reqwest::Client,
    base_url: String,
    server_key: String,
}

impl SnapGateway {
    pub fn new(base_url: &str, server_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            server_key: server_key.to_string(),
        }
    }

    fn auth_header(&self) -> String {
        let encoded =
            base64::engine::general_purpose::STANDARD.encode(format!("{}:", self.server_key));
        format!("Basic {encoded}")
    }
}

#[derive(Debug, Deserialize)]
struct SnapTransactionResponse {
    redirect_url: String,
}

#[async_trait]
impl PaymentGateway for SnapGateway {
    async fn create_transaction(&self, order: &Order) -> AppResult<String> {
        let body = json!({
            "transaction_details": {
                "order_id": order.order_number,
                "gross_amount": order.total_amount,
            },
            "item_details": [{
                "id": order.order_number,
                "price": order.total_amount,
                "quantity": 1,
                "name": format!("Payment for order {}", order.order_number),
            }],
        });

        let response = self
            .client
            .post(format!("{}/snap/v1/transactions", self.base_url))
            .header(http::header::AUTHORIZATION, self.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_message(
                    ErrorCode::PaymentGatewayError,
                    format!("Gateway request failed: {e}"),
                )
            })?;

        if !response.status().is_success() {
            return Err(AppError::with_message(
                ErrorCode::PaymentGatewayError,
                format!("Gateway returned {}", response.status()),
            ));
        }

        let parsed: SnapTransactionResponse = response.json().await.map_err(|e| {
            AppError::with_message(
                ErrorCode::PaymentGatewayError,
                format!("Malformed gateway response: {e}"),
            )
        })?;

        Ok(parsed.redirect_url)
    }
}
