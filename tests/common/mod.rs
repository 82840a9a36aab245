use std::sync::Arc;

use reqwest::Client;
use rust_decimal_macros::dec;
use serde_json::json;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use backoffice_rs::clients::{HttpBackofficeApi, HttpMenuApi, HttpOrderApi};
use backoffice_rs::handlers::create_app;
use backoffice_rs::observability::Metrics;
use backoffice_rs::services::{
    CartService, DashboardService, ExchangeRates, MenuService, OrderService,
};

/// The service under test listening on an ephemeral port, wired against a
/// wiremock stand-in for the remote back-office REST API.
pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
    pub upstream: MockServer,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let upstream = MockServer::start().await;

        let http_client = Client::new();
        let menu_api = Arc::new(HttpMenuApi::new(http_client.clone(), upstream.uri()));
        let order_api = Arc::new(HttpOrderApi::new(http_client.clone(), upstream.uri()));
        let backoffice_api = Arc::new(HttpBackofficeApi::new(http_client.clone(), upstream.uri()));

        let metrics = Arc::new(Metrics::new().expect("Failed to create metrics"));
        let rates = Arc::new(ExchangeRates::fixed(dec!(56.5)));
        let cart_service = Arc::new(CartService::new(rates));
        let menu_service = Arc::new(MenuService::new(menu_api));
        let order_service = Arc::new(OrderService::new(order_api, cart_service.clone()));
        let dashboard_service = Arc::new(DashboardService::new(backoffice_api));

        let app = create_app(
            metrics,
            menu_service,
            cart_service,
            order_service,
            dashboard_service,
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server failed");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{}", addr),
            upstream,
        }
    }

    /// Serve a menu item from the mocked remote API at GET /menu/{id}/.
    pub async fn mount_menu_item(&self, item: serde_json::Value) {
        let id = item["id"].as_i64().expect("menu item needs an id");
        Mock::given(method("GET"))
            .and(path(format!("/menu/{}/", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(item))
            .mount(&self.upstream)
            .await;
    }
}

/// Menu item record as the remote API serves it.
pub fn menu_item_json(
    id: i64,
    name: &str,
    price: &str,
    currency: Option<&str>,
) -> serde_json::Value {
    let mut item = json!({
        "id": id,
        "name": name,
        "description": "Test menu item",
        "price": price,
        "category": "FOOD",
        "is_available": true
    });
    if let Some(code) = currency {
        item["currency"] = json!(code);
    }
    item
}
