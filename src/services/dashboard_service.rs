use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::clients::BackofficeApi;
use crate::models::{
    Employee, InventoryListResponse, LeasePayment, SalesReport, ServiceResult,
};

/// Read-only proxies for the dashboard collections of the remote API.
///
/// Pure pass-through apart from the inventory stock-value total the summary
/// card shows; charting and interval refresh belong to the presentation side.
pub struct DashboardService {
    backoffice_api: Arc<dyn BackofficeApi>,
}

impl DashboardService {
    pub fn new(backoffice_api: Arc<dyn BackofficeApi>) -> Self {
        Self { backoffice_api }
    }

    #[instrument(skip(self))]
    pub async fn list_inventory(&self) -> ServiceResult<InventoryListResponse> {
        let items = self.backoffice_api.list_inventory().await?;

        let total_stock_value: Decimal = items.iter().map(|item| item.stock_value()).sum();
        let total_count = items.len();
        info!("Listed {} inventory items", total_count);

        Ok(InventoryListResponse {
            items,
            total_count,
            total_stock_value,
        })
    }

    #[instrument(skip(self))]
    pub async fn list_employees(&self) -> ServiceResult<Vec<Employee>> {
        let employees = self.backoffice_api.list_employees().await?;
        info!("Listed {} employees", employees.len());
        Ok(employees)
    }

    #[instrument(skip(self))]
    pub async fn list_leases(&self) -> ServiceResult<Vec<LeasePayment>> {
        let leases = self.backoffice_api.list_leases().await?;
        info!("Listed {} lease payments", leases.len());
        Ok(leases)
    }

    #[instrument(skip(self))]
    pub async fn sales_report(&self) -> ServiceResult<SalesReport> {
        let report = self.backoffice_api.fetch_sales_report().await?;
        info!("Fetched sales report");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiError, ApiResult, InventoryItem, ServiceError};
    use async_trait::async_trait;
    use mockall::mock;
    use rust_decimal_macros::dec;

    mock! {
        TestBackofficeApi {}

        #[async_trait]
        impl BackofficeApi for TestBackofficeApi {
            async fn list_inventory(&self) -> ApiResult<Vec<InventoryItem>>;
            async fn list_employees(&self) -> ApiResult<Vec<Employee>>;
            async fn list_leases(&self) -> ApiResult<Vec<LeasePayment>>;
            async fn fetch_sales_report(&self) -> ApiResult<SalesReport>;
        }
    }

    #[tokio::test]
    async fn test_inventory_totals_stock_value() {
        let mut api = MockTestBackofficeApi::new();
        api.expect_list_inventory().times(1).returning(|| {
            Ok(vec![
                InventoryItem {
                    id: 1,
                    item_name: "Rice (50kg)".to_string(),
                    quantity: 4,
                    purchase_price: dec!(2300.00),
                    sale_price: dec!(2600.00),
                },
                InventoryItem {
                    id: 2,
                    item_name: "Cooking oil".to_string(),
                    quantity: 10,
                    purchase_price: dec!(150.00),
                    sale_price: dec!(180.00),
                },
            ])
        });

        let service = DashboardService::new(Arc::new(api));
        let response = service.list_inventory().await.unwrap();

        assert_eq!(response.total_count, 2);
        assert_eq!(response.total_stock_value, dec!(10700.00));
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let mut api = MockTestBackofficeApi::new();
        api.expect_list_employees().times(1).returning(|| {
            Err(ApiError::Request {
                endpoint: "/employees/".to_string(),
                message: "connection refused".to_string(),
            })
        });

        let service = DashboardService::new(Arc::new(api));
        let err = service.list_employees().await.unwrap_err();
        assert!(matches!(err, ServiceError::Api { .. }));
    }
}
