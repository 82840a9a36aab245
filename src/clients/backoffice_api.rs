use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument, Instrument};

use super::{api_span, decode_json, ensure_success, send};
use crate::models::{ApiResult, Employee, InventoryItem, LeasePayment, SalesReport};

/// Trait defining read-only access to the dashboard collections of the
/// remote back-office API
#[async_trait]
pub trait BackofficeApi: Send + Sync {
    async fn list_inventory(&self) -> ApiResult<Vec<InventoryItem>>;

    async fn list_employees(&self) -> ApiResult<Vec<Employee>>;

    async fn list_leases(&self) -> ApiResult<Vec<LeasePayment>>;

    async fn fetch_sales_report(&self) -> ApiResult<SalesReport>;
}

/// reqwest-backed implementation against the configured base URL
pub struct HttpBackofficeApi {
    client: Client,
    base_url: String,
}

impl HttpBackofficeApi {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_list<T: serde::de::DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
    ) -> ApiResult<Vec<T>> {
        let url = self.url(path);
        let span = api_span(operation, "GET", &url);

        async {
            let response = send(&url, self.client.get(&url)).await?;
            let response = ensure_success(&url, response).await?;
            decode_json(&url, response).await
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl BackofficeApi for HttpBackofficeApi {
    #[instrument(skip(self))]
    async fn list_inventory(&self) -> ApiResult<Vec<InventoryItem>> {
        let items = self.get_list("ListInventory", "inventory/").await?;
        info!("Fetched {} inventory items", items.len());
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn list_employees(&self) -> ApiResult<Vec<Employee>> {
        let employees = self.get_list("ListEmployees", "employees/").await?;
        info!("Fetched {} employees", employees.len());
        Ok(employees)
    }

    #[instrument(skip(self))]
    async fn list_leases(&self) -> ApiResult<Vec<LeasePayment>> {
        let leases = self.get_list("ListLeases", "leases/").await?;
        info!("Fetched {} lease payments", leases.len());
        Ok(leases)
    }

    #[instrument(skip(self))]
    async fn fetch_sales_report(&self) -> ApiResult<SalesReport> {
        let url = self.url("reports/expenses/");
        let span = api_span("FetchSalesReport", "GET", &url);

        let report: SalesReport = async {
            let response = send(&url, self.client.get(&url)).await?;
            let response = ensure_success(&url, response).await?;
            decode_json(&url, response).await
        }
        .instrument(span)
        .await?;

        info!(
            daily_buckets = report.daily_sales.len(),
            "Fetched sales report"
        );
        Ok(report)
    }
}
