use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::clients::OrderApi;
use crate::models::{
    OrderDraftMeta, OrderListResponse, OrderSubmission, OrderSubmitResponse, ServiceError,
    ServiceResult, UpdateOrderDraftRequest, Validate,
};
use crate::services::CartService;

/// Assembles and submits orders from the session cart.
///
/// Holds the order draft metadata between submissions and guards against
/// re-entrant submits with a single-flight flag. The cart itself stays
/// editable while a submission is outstanding; the submitted payload is the
/// snapshot taken at validation time.
pub struct OrderService {
    order_api: Arc<dyn OrderApi>,
    cart: Arc<CartService>,
    draft: RwLock<OrderDraftMeta>,
    in_flight: AtomicBool,
}

impl OrderService {
    /// Create a new OrderService with default draft metadata.
    pub fn new(order_api: Arc<dyn OrderApi>, cart: Arc<CartService>) -> Self {
        Self {
            order_api,
            cart,
            draft: RwLock::new(OrderDraftMeta::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Current draft metadata.
    pub async fn draft(&self) -> OrderDraftMeta {
        self.draft.read().await.clone()
    }

    /// Apply a partial update to the draft metadata.
    #[instrument(skip(self, request))]
    pub async fn update_draft(
        &self,
        request: UpdateOrderDraftRequest,
    ) -> ServiceResult<OrderDraftMeta> {
        request.validate()?;

        let mut draft = self.draft.write().await;
        draft.apply(request);
        info!(customer_id = %draft.customer_id, "Order draft updated");
        Ok(draft.clone())
    }

    /// Validate the draft and cart, then submit the order to the remote API.
    ///
    /// Validation failures and remote failures leave the cart and draft
    /// exactly as they were; only a successful submission clears the cart
    /// and resets the draft. A submit while another is in flight is
    /// rejected; there are no automatic retries.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> ServiceResult<OrderSubmitResponse> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ServiceError::SubmissionInProgress);
        }

        let result = self.submit_inner().await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn submit_inner(&self) -> ServiceResult<OrderSubmitResponse> {
        let meta = self.draft.read().await.clone();
        if meta.customer_id.trim().is_empty() {
            return Err(ServiceError::MissingCustomerId);
        }
        if meta.customer_name.trim().is_empty() {
            return Err(ServiceError::MissingCustomerName);
        }

        let lines = self.cart.snapshot().await;
        if lines.is_empty() {
            return Err(ServiceError::EmptyCart);
        }

        let currency = self.cart.display_currency().await;
        let rate = self.cart.current_rate().await;
        let submission = OrderSubmission::assemble(&meta, &lines, currency, rate);

        info!(
            customer_id = %submission.customer_id,
            currency = %submission.currency,
            total_amount = %submission.total_amount,
            line_count = submission.order_items.len(),
            "Submitting order"
        );

        match self.order_api.submit_order(&submission).await {
            Ok(receipt) => {
                self.cart.clear().await;
                *self.draft.write().await = OrderDraftMeta::new();
                info!(order_id = ?receipt.id, "Order placed successfully");

                Ok(OrderSubmitResponse {
                    order_id: receipt.id,
                    currency,
                    total_amount: submission.total_amount,
                    line_count: submission.order_items.len(),
                })
            }
            Err(api_error) => {
                error!(error = %api_error, "Order submission failed, cart preserved");
                Err(ServiceError::OrderSubmitFailed {
                    message: api_error.detail(),
                })
            }
        }
    }

    /// Previously submitted orders from the remote API.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> ServiceResult<OrderListResponse> {
        let orders = self.order_api.list_orders().await?;
        let total_count = orders.len();
        Ok(OrderListResponse {
            orders,
            total_count,
        })
    }
}
