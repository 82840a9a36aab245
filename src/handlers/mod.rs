pub mod admin;
pub mod api;
pub mod health;
pub mod metrics;
pub mod middleware;

pub use admin::*;
pub use api::*;
pub use health::*;
pub use metrics::*;
pub use middleware::*;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::observability::{observability_middleware, Metrics};
use crate::services::{CartService, DashboardService, MenuService, OrderService};

/// Build the application router with all endpoints and middleware layers
pub fn create_app(
    metrics: Arc<Metrics>,
    menu_service: Arc<MenuService>,
    cart_service: Arc<CartService>,
    order_service: Arc<OrderService>,
    dashboard_service: Arc<DashboardService>,
) -> Router {
    let metrics_for_middleware = metrics.clone();

    // Create the API state
    let api_state = api::ApiState {
        menu_service: menu_service.clone(),
        cart_service,
        order_service,
        dashboard_service,
        metrics: metrics.clone(),
    };

    // Create the admin state
    let admin_state = admin::AdminState {
        menu_service,
        metrics: metrics.clone(),
    };

    Router::new()
        // Health and metrics endpoints (with metrics state)
        .route("/health/status", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        // Menu endpoints
        .route("/api/menu", get(api::list_menu))
        .route("/api/menu/:item_id", get(api::get_menu_item))
        // Cart endpoints
        .route("/api/cart", get(api::get_cart))
        .route("/api/cart/items", post(api::add_cart_line))
        .route(
            "/api/cart/items/:item_id",
            put(api::update_cart_line).delete(api::remove_cart_line),
        )
        .route("/api/cart/clear", post(api::clear_cart))
        // Currency settings
        .route(
            "/api/settings/currency",
            get(api::get_currency_settings).put(api::set_currency_settings),
        )
        // Order endpoints
        .route(
            "/api/order/draft",
            get(api::get_order_draft).put(api::update_order_draft),
        )
        .route("/api/order/submit", post(api::submit_order))
        .route("/api/orders", get(api::list_orders))
        // Dashboard endpoints
        .route("/api/inventory", get(api::list_inventory))
        .route("/api/employees", get(api::list_employees))
        .route("/api/leases", get(api::list_leases))
        .route("/api/reports/sales", get(api::sales_report))
        .with_state(api_state)
        // Admin endpoints (with admin state)
        .route("/api/admin/menu", post(admin::create_menu_item))
        .route(
            "/api/admin/menu/:item_id",
            put(admin::update_menu_item).delete(admin::delete_menu_item),
        )
        .with_state(admin_state)
        // Add middleware layers (order matters - outer to inner)
        .layer(axum_middleware::from_fn(security_headers_middleware))
        .layer(axum_middleware::from_fn(cors_middleware))
        .layer(axum_middleware::from_fn(request_validation_middleware))
        .layer(axum_middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
}
