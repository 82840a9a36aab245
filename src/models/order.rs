use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartLine;
use super::currency::Currency;
use super::enums::OrderStatus;

/// Customer and order metadata held between submissions.
///
/// Mirrors the order form: filled in by the operator, consumed by the next
/// submission, and reset to defaults once that submission succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraftMeta {
    pub customer_id: String,
    pub customer_name: String,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
}

impl OrderDraftMeta {
    pub fn new() -> Self {
        Self {
            customer_id: String::new(),
            customer_name: String::new(),
            order_date: Utc::now().date_naive(),
            status: OrderStatus::default(),
        }
    }

    /// Apply a partial update from the draft endpoint.
    pub fn apply(&mut self, update: UpdateOrderDraftRequest) {
        if let Some(customer_id) = update.customer_id {
            self.customer_id = customer_id;
        }
        if let Some(customer_name) = update.customer_name {
            self.customer_name = customer_name;
        }
        if let Some(order_date) = update.order_date {
            self.order_date = order_date;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

impl Default for OrderDraftMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// Request model for updating the order draft metadata
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateOrderDraftRequest {
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub status: Option<OrderStatus>,
}

/// One line of the order submission payload. Field names are owned by the
/// remote order API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item: i64,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub item_currency: Currency,
}

/// Order submission payload accepted by the remote order API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub customer_id: String,
    pub customer_name: String,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub currency: Currency,
    pub total_amount: Decimal,
    pub order_items: Vec<OrderLine>,
}

impl OrderSubmission {
    /// Assemble the payload from the cart snapshot and draft metadata. Every
    /// unit price is converted into the order currency at the given rate.
    pub fn assemble(
        meta: &OrderDraftMeta,
        lines: &[CartLine],
        currency: Currency,
        rate: Decimal,
    ) -> Self {
        let order_items: Vec<OrderLine> = lines
            .iter()
            .map(|line| OrderLine {
                menu_item: line.item_id,
                quantity: line.quantity,
                unit_price: line.unit_price_in(currency, rate),
                item_currency: currency,
            })
            .collect();

        let total_amount = lines
            .iter()
            .map(|line| line.amount_in(currency, rate))
            .sum();

        Self {
            customer_id: meta.customer_id.clone(),
            customer_name: meta.customer_name.clone(),
            date: meta.order_date,
            status: meta.status,
            currency,
            total_amount,
            order_items,
        }
    }
}

/// Acknowledgement returned by the remote order API on create
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderReceipt {
    #[serde(default)]
    pub id: Option<i64>,
}

/// Result of a successful submission, reported back to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmitResponse {
    pub order_id: Option<i64>,
    pub currency: Currency,
    pub total_amount: Decimal,
    pub line_count: usize,
}

/// Previously submitted order as returned by the orders listing. The remote
/// API has served two generations of this shape, hence the lenient fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: i64,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
}

/// Response model for the orders listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderRecord>,
    pub total_count: usize,
}
