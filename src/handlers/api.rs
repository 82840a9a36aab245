use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::models::{
    AddCartLineRequest, ApiError, CartResponse, Currency, Employee, InventoryListResponse,
    LeasePayment, MenuCategory, MenuItem, MenuListResponse, OrderDraftMeta, OrderListResponse,
    OrderSubmitResponse, SalesReport, ServiceError, UpdateCartLineRequest,
    UpdateOrderDraftRequest,
};
use crate::observability::Metrics;
use crate::services::{CartService, DashboardService, MenuService, OrderService};

/// Shared application state containing all services
#[derive(Clone)]
pub struct ApiState {
    pub menu_service: Arc<MenuService>,
    pub cart_service: Arc<CartService>,
    pub order_service: Arc<OrderService>,
    pub dashboard_service: Arc<DashboardService>,
    pub metrics: Arc<Metrics>,
}

/// Query parameters for listing the menu
#[derive(Debug, Deserialize)]
pub struct ListMenuQuery {
    pub category: Option<String>,
    pub available_only: Option<bool>,
}

/// Request model for selecting the display currency
#[derive(Debug, Deserialize)]
pub struct SetCurrencyRequest {
    pub currency: String,
}

/// Current display currency and the rate used for pricing
#[derive(Debug, Serialize)]
pub struct CurrencySettingsResponse {
    pub display_currency: Currency,
    pub exchange_rate: rust_decimal::Decimal,
}

// =============================================================================
// MENU ENDPOINTS
// =============================================================================

/// List menu items with optional filters
#[instrument(name = "list_menu", skip(state), fields(
    category = query.category.as_deref(),
    available_only = query.available_only,
))]
pub async fn list_menu(
    State(state): State<ApiState>,
    Query(query): Query<ListMenuQuery>,
) -> Result<Json<MenuListResponse>, (StatusCode, Json<Value>)> {
    info!("Listing menu items");

    let category = match query.category.as_deref() {
        None | Some("all") => None,
        Some(raw) => match raw.parse::<MenuCategory>() {
            Ok(category) => Some(category),
            Err(err) => {
                error!("Invalid category filter: {}", err);
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Invalid query parameters",
                        "message": err,
                        "timestamp": chrono::Utc::now().to_rfc3339(),
                    })),
                ));
            }
        },
    };

    let result = state
        .menu_service
        .list_items(category, query.available_only.unwrap_or(false))
        .await;
    state.metrics.record_menu_operation("list", result.is_ok());

    match result {
        Ok(response) => {
            info!("Successfully listed {} menu items", response.total_count);
            Ok(Json(response))
        }
        Err(err) => {
            error!("Failed to list menu items: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Get a specific menu item by ID
#[instrument(name = "get_menu_item", skip(state), fields(item_id = %item_id))]
pub async fn get_menu_item(
    State(state): State<ApiState>,
    Path(item_id): Path<i64>,
) -> Result<Json<MenuItem>, (StatusCode, Json<Value>)> {
    let result = state.menu_service.get_item(item_id).await;
    state.metrics.record_menu_operation("get", result.is_ok());

    match result {
        Ok(item) => {
            info!("Successfully retrieved menu item: {}", item.name);
            Ok(Json(item))
        }
        Err(err) => {
            crate::warn_with_trace!("Failed to get menu item {}: {}", item_id, err);
            Err(service_error_to_response(err))
        }
    }
}

// =============================================================================
// CART ENDPOINTS
// =============================================================================

/// Get the session cart priced in the display currency
#[instrument(name = "get_cart", skip(state))]
pub async fn get_cart(State(state): State<ApiState>) -> Json<CartResponse> {
    let view = state.cart_service.view().await;
    publish_rate(&state, &view);
    Json(view)
}

/// Add a menu item to the cart by id, snapshotting its current price
#[instrument(name = "add_cart_line", skip(state, request), fields(item_id = request.item_id))]
pub async fn add_cart_line(
    State(state): State<ApiState>,
    Json(request): Json<AddCartLineRequest>,
) -> Result<(StatusCode, Json<CartResponse>), (StatusCode, Json<Value>)> {
    crate::info_with_trace!("Adding menu item {} to cart", request.item_id);

    let result = async {
        let item = state.menu_service.get_item(request.item_id).await?;
        state.cart_service.add_item(&item).await
    }
    .await;
    state.metrics.record_cart_operation("add", result.is_ok());

    match result {
        Ok(view) => {
            info!("Successfully added item to cart");
            publish_rate(&state, &view);
            Ok((StatusCode::CREATED, Json(view)))
        }
        Err(err) => {
            error!("Failed to add item to cart: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Update a cart line quantity; below 1 removes the line
#[instrument(name = "update_cart_line", skip(state, request), fields(
    item_id = %item_id,
    quantity = request.quantity,
))]
pub async fn update_cart_line(
    State(state): State<ApiState>,
    Path(item_id): Path<i64>,
    Json(request): Json<UpdateCartLineRequest>,
) -> Result<Json<CartResponse>, (StatusCode, Json<Value>)> {
    let result = state
        .cart_service
        .set_quantity(item_id, request.quantity)
        .await;
    state
        .metrics
        .record_cart_operation("set_quantity", result.is_ok());

    match result {
        Ok(view) => {
            info!("Cart line quantity updated");
            Ok(Json(view))
        }
        Err(err) => {
            error!("Failed to update cart line: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Remove a cart line
#[instrument(name = "remove_cart_line", skip(state), fields(item_id = %item_id))]
pub async fn remove_cart_line(
    State(state): State<ApiState>,
    Path(item_id): Path<i64>,
) -> Json<CartResponse> {
    let view = state.cart_service.remove_item(item_id).await;
    state.metrics.record_cart_operation("remove", true);
    Json(view)
}

/// Clear the cart
#[instrument(name = "clear_cart", skip(state))]
pub async fn clear_cart(State(state): State<ApiState>) -> StatusCode {
    state.cart_service.clear().await;
    state.metrics.record_cart_operation("clear", true);
    StatusCode::NO_CONTENT
}

// =============================================================================
// CURRENCY SETTINGS ENDPOINTS
// =============================================================================

/// Get the display currency and current exchange rate
#[instrument(name = "get_currency_settings", skip(state))]
pub async fn get_currency_settings(State(state): State<ApiState>) -> Json<CurrencySettingsResponse> {
    let display_currency = state.cart_service.display_currency().await;
    let exchange_rate = state.cart_service.current_rate().await;
    state
        .metrics
        .set_exchange_rate(decimal_to_f64(exchange_rate));

    Json(CurrencySettingsResponse {
        display_currency,
        exchange_rate,
    })
}

/// Switch the display currency
#[instrument(name = "set_currency_settings", skip(state, request), fields(currency = %request.currency))]
pub async fn set_currency_settings(
    State(state): State<ApiState>,
    Json(request): Json<SetCurrencyRequest>,
) -> Result<Json<CurrencySettingsResponse>, (StatusCode, Json<Value>)> {
    let currency = match Currency::from_wire(Some(&request.currency)) {
        Ok(currency) => currency,
        Err(err) => {
            error!("Rejected display currency: {}", err);
            return Err(service_error_to_response(err));
        }
    };

    let display_currency = state.cart_service.set_display_currency(currency).await;
    let exchange_rate = state.cart_service.current_rate().await;
    state
        .metrics
        .set_exchange_rate(decimal_to_f64(exchange_rate));

    info!("Display currency set to {}", display_currency);
    Ok(Json(CurrencySettingsResponse {
        display_currency,
        exchange_rate,
    }))
}

// =============================================================================
// ORDER ENDPOINTS
// =============================================================================

/// Get the order draft metadata
#[instrument(name = "get_order_draft", skip(state))]
pub async fn get_order_draft(State(state): State<ApiState>) -> Json<OrderDraftMeta> {
    Json(state.order_service.draft().await)
}

/// Update the order draft metadata
#[instrument(name = "update_order_draft", skip(state, request))]
pub async fn update_order_draft(
    State(state): State<ApiState>,
    Json(request): Json<UpdateOrderDraftRequest>,
) -> Result<Json<OrderDraftMeta>, (StatusCode, Json<Value>)> {
    match state.order_service.update_draft(request).await {
        Ok(draft) => Ok(Json(draft)),
        Err(err) => {
            error!("Failed to update order draft: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Submit the cart as an order to the remote API
#[instrument(name = "submit_order", skip(state))]
pub async fn submit_order(
    State(state): State<ApiState>,
) -> Result<(StatusCode, Json<OrderSubmitResponse>), (StatusCode, Json<Value>)> {
    crate::info_with_trace!("Submitting order");

    let result = state.order_service.submit().await;
    state.metrics.record_order_submission(result.is_ok());

    match result {
        Ok(response) => {
            info!(
                order_id = ?response.order_id,
                total_amount = %response.total_amount,
                "Order placed successfully"
            );
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(err) => {
            crate::error_with_trace!("Order submission failed: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// List previously submitted orders
#[instrument(name = "list_orders", skip(state))]
pub async fn list_orders(
    State(state): State<ApiState>,
) -> Result<Json<OrderListResponse>, (StatusCode, Json<Value>)> {
    match state.order_service.list_orders().await {
        Ok(response) => {
            info!("Listed {} orders", response.total_count);
            Ok(Json(response))
        }
        Err(err) => {
            error!("Failed to list orders: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

// =============================================================================
// DASHBOARD ENDPOINTS
// =============================================================================

/// List inventory items with the aggregate stock value
#[instrument(name = "list_inventory", skip(state))]
pub async fn list_inventory(
    State(state): State<ApiState>,
) -> Result<Json<InventoryListResponse>, (StatusCode, Json<Value>)> {
    state
        .dashboard_service
        .list_inventory()
        .await
        .map(Json)
        .map_err(|err| {
            error!("Failed to list inventory: {}", err);
            service_error_to_response(err)
        })
}

/// List employees
#[instrument(name = "list_employees", skip(state))]
pub async fn list_employees(
    State(state): State<ApiState>,
) -> Result<Json<Vec<Employee>>, (StatusCode, Json<Value>)> {
    state
        .dashboard_service
        .list_employees()
        .await
        .map(Json)
        .map_err(|err| {
            error!("Failed to list employees: {}", err);
            service_error_to_response(err)
        })
}

/// List lease payments
#[instrument(name = "list_leases", skip(state))]
pub async fn list_leases(
    State(state): State<ApiState>,
) -> Result<Json<Vec<LeasePayment>>, (StatusCode, Json<Value>)> {
    state
        .dashboard_service
        .list_leases()
        .await
        .map(Json)
        .map_err(|err| {
            error!("Failed to list leases: {}", err);
            service_error_to_response(err)
        })
}

/// Fetch the sales report
#[instrument(name = "sales_report", skip(state))]
pub async fn sales_report(
    State(state): State<ApiState>,
) -> Result<Json<SalesReport>, (StatusCode, Json<Value>)> {
    state
        .dashboard_service
        .sales_report()
        .await
        .map(Json)
        .map_err(|err| {
            error!("Failed to fetch sales report: {}", err);
            service_error_to_response(err)
        })
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

fn decimal_to_f64(value: rust_decimal::Decimal) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    value.to_f64().unwrap_or(0.0)
}

fn publish_rate(state: &ApiState, view: &CartResponse) {
    state
        .metrics
        .set_exchange_rate(decimal_to_f64(view.exchange_rate));
}

/// Convert ServiceError to HTTP response
pub(crate) fn service_error_to_response(err: ServiceError) -> (StatusCode, Json<Value>) {
    let (status, message) = match &err {
        ServiceError::MenuItemNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::ItemUnavailable { .. } => (StatusCode::CONFLICT, err.to_string()),
        ServiceError::UnsupportedCurrency { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::MissingCustomerId
        | ServiceError::MissingCustomerName
        | ServiceError::EmptyCart => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::SubmissionInProgress => (StatusCode::CONFLICT, err.to_string()),
        ServiceError::OrderSubmitFailed { .. } => (StatusCode::BAD_GATEWAY, err.to_string()),
        ServiceError::ValidationError { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::Api { source } => match source {
            ApiError::Request { .. } => (StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
            ApiError::Status { .. } | ApiError::Decode { .. } => {
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
        },
        ServiceError::Configuration { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Configuration error".to_string(),
        ),
    };

    (
        status,
        Json(json!({
            "error": message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
