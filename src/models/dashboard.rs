use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock record from the remote inventory API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub item_name: String,
    pub quantity: u32,
    pub purchase_price: Decimal,
    pub sale_price: Decimal,
}

impl InventoryItem {
    /// Purchase value of the stock on hand.
    pub fn stock_value(&self) -> Decimal {
        self.purchase_price * Decimal::from(self.quantity)
    }
}

/// Response model for the inventory listing, with the aggregate stock value
/// the dashboard summary card shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryListResponse {
    pub items: Vec<InventoryItem>,
    pub total_count: usize,
    pub total_stock_value: Decimal,
}

/// Employee record from the remote employees API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
    pub salary: Decimal,
    pub hire_date: NaiveDate,
}

/// Lease payment record from the remote leases API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeasePayment {
    pub id: i64,
    pub restaurant_name: String,
    pub amount_due: Decimal,
    pub due_date: NaiveDate,
    pub is_paid: bool,
}

/// One aggregation bucket of the sales report. The period key varies by
/// granularity (day, week, month, year), so it is captured as a flat map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesBucket {
    #[serde(flatten)]
    pub period: std::collections::HashMap<String, serde_json::Value>,
    pub total: Decimal,
}

/// Sales report served by the remote reports API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesReport {
    #[serde(default)]
    pub summary: SalesSummary,
    #[serde(default)]
    pub daily_sales: Vec<SalesBucket>,
    #[serde(default)]
    pub weekly_sales: Vec<SalesBucket>,
    #[serde(default)]
    pub monthly_sales: Vec<SalesBucket>,
    #[serde(default)]
    pub yearly_sales: Vec<SalesBucket>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesSummary {
    #[serde(default)]
    pub total_sales: Option<Decimal>,
}
