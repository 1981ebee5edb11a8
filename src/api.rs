//! HTTP client for the trade engine's order endpoints

use crate::types::{OrderRequest, SubmissionContext, TransactionContext};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Response to order creation
///
/// `success: false` is a service-level rejection, not a transport error;
/// callers inspect it rather than matching on `Err`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    /// Whether the engine accepted the order
    pub success: bool,
    /// Engine message, present on rejection
    #[serde(default)]
    pub message: Option<String>,
    /// Identifier tying the follow-up submission to this order
    #[serde(default)]
    pub order_id: Option<String>,
    /// Unsigned transactions to sign, in execution order
    #[serde(default)]
    pub transactions: Vec<TransactionContext>,
}

/// Body for the submission endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderRequest {
    /// Order these signed transactions belong to
    pub order_id: String,
    /// Signed transactions, same ids and order as received
    pub transactions: Vec<SubmissionContext>,
}

/// Response to order submission
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderResponse {
    /// Whether the engine broadcast the order
    pub success: bool,
    /// Engine message, present on failure
    #[serde(default)]
    pub message: Option<String>,
    /// Per-transaction broadcast outcomes
    #[serde(default)]
    pub transactions: Vec<BroadcastResult>,
}

/// Broadcast outcome for one transaction
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastResult {
    /// Identifier from the original transaction context
    pub id: String,
    /// On-chain transaction hash, when broadcast
    #[serde(default)]
    pub tx_hash: Option<String>,
    /// Token amount moved by this transaction, when reported
    #[serde(default)]
    pub token_delta: Option<String>,
}

/// Client for the trade engine API
pub struct EngineClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EngineClient {
    /// Create a client for the given engine base URL
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .use_rustls_tls()
            .build()
            .context("Failed to build HTTP client")?;

        let base_url = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Create an order, returning the unsigned transaction bundle
    pub async fn create_order(&self, order: &OrderRequest) -> Result<CreateOrderResponse> {
        let url = format!("{}/orders", self.base_url);
        tracing::debug!("Creating {} order for token {}", order.direction, order.token);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(order)
            .send()
            .await
            .context("Failed to reach the trade engine")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            eyre::bail!("Order creation failed: {} - {}", status, body);
        }

        resp.json()
            .await
            .context("Failed to parse order creation response")
    }

    /// Submit the signed transaction bundle for broadcast
    pub async fn submit_order(
        &self,
        submission: &SubmitOrderRequest,
    ) -> Result<SubmitOrderResponse> {
        let url = format!("{}/orders/submit", self.base_url);
        tracing::debug!(
            "Submitting {} signed transactions for order {}",
            submission.transactions.len(),
            submission.order_id
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(submission)
            .send()
            .await
            .context("Failed to reach the trade engine")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            eyre::bail!("Order submission failed: {} - {}", status, body);
        }

        resp.json()
            .await
            .context("Failed to parse order submission response")
    }
}
