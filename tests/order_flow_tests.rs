use backoffice_rs::models::{
    CartResponse, Currency, OrderDraftMeta, OrderStatus, OrderSubmission, OrderSubmitResponse,
};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::*;

async fn fill_reference_cart(env: &TestEnvironment) {
    // cart = [2 x 10.00 USD, 1 x 565.00 PHP], the reference pricing scenario
    env.mount_menu_item(menu_item_json(1, "Cheeseburger", "10.00", Some("USD")))
        .await;
    env.mount_menu_item(menu_item_json(2, "Halo-halo", "565.00", Some("PHP")))
        .await;

    for item_id in [1, 1, 2] {
        let response = env
            .client
            .post(format!("{}/api/cart/items", env.base_url))
            .json(&json!({"item_id": item_id}))
            .send()
            .await
            .expect("Failed to add cart item");
        assert_eq!(response.status().as_u16(), 201);
    }
}

async fn set_customer_draft(env: &TestEnvironment) {
    let response = env
        .client
        .put(format!("{}/api/order/draft", env.base_url))
        .json(&json!({
            "customer_id": "C042",
            "customer_name": "Maria Santos"
        }))
        .send()
        .await
        .expect("Failed to update draft");
    assert_eq!(response.status().as_u16(), 200);
}

async fn get_cart(env: &TestEnvironment) -> CartResponse {
    env.client
        .get(format!("{}/api/cart", env.base_url))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to parse cart")
}

async fn submitted_order(upstream: &MockServer) -> OrderSubmission {
    let requests = upstream
        .received_requests()
        .await
        .expect("request recording enabled");
    let request = requests
        .iter()
        .rev()
        .find(|request| request.url.path() == "/orders/")
        .expect("No order submission received");
    serde_json::from_slice(&request.body).expect("Failed to parse submitted order")
}

#[tokio::test]
async fn test_cart_aggregates_mixed_currencies_in_usd() {
    let env = TestEnvironment::new().await;
    fill_reference_cart(&env).await;

    let cart = get_cart(&env).await;
    assert_eq!(cart.display_currency, Currency::Usd);
    assert_eq!(cart.exchange_rate, dec!(56.5));
    assert_eq!(cart.lines.len(), 2);

    assert_eq!(cart.lines[0].quantity, 2);
    assert_eq!(cart.lines[0].line_total, dec!(20.00));
    assert_eq!(cart.lines[1].quantity, 1);
    assert_eq!(cart.lines[1].line_total, dec!(10));
    assert_eq!(cart.total_amount, dec!(30.00));
}

#[tokio::test]
async fn test_currency_toggle_reprices_cart_without_touching_snapshots() {
    let env = TestEnvironment::new().await;
    fill_reference_cart(&env).await;

    let response = env
        .client
        .put(format!("{}/api/settings/currency", env.base_url))
        .json(&json!({"currency": "PHP"}))
        .send()
        .await
        .expect("Failed to set currency");
    assert_eq!(response.status().as_u16(), 200);

    let cart = get_cart(&env).await;
    assert_eq!(cart.display_currency, Currency::Php);
    assert_eq!(cart.lines[0].line_total, dec!(1130.000));
    assert_eq!(cart.lines[1].line_total, dec!(565.00));
    assert_eq!(cart.total_amount, dec!(1695.000));

    // Snapshots stay in the currency each item was added in.
    assert_eq!(cart.lines[0].original_currency, Currency::Usd);
    assert_eq!(cart.lines[0].original_price, dec!(10.00));
    assert_eq!(cart.lines[1].original_currency, Currency::Php);
}

#[tokio::test]
async fn test_successful_submission_clears_cart_and_resets_draft() {
    let env = TestEnvironment::new().await;
    fill_reference_cart(&env).await;
    set_customer_draft(&env).await;

    Mock::given(method("POST"))
        .and(path("/orders/"))
        .and(body_partial_json(json!({
            "customer_id": "C042",
            "customer_name": "Maria Santos",
            "status": "pending",
            "currency": "USD"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 17})))
        .expect(1)
        .mount(&env.upstream)
        .await;

    let response = env
        .client
        .post(format!("{}/api/order/submit", env.base_url))
        .send()
        .await
        .expect("Failed to submit order");
    assert_eq!(response.status().as_u16(), 201);

    let receipt: OrderSubmitResponse = response.json().await.expect("Failed to parse receipt");
    assert_eq!(receipt.order_id, Some(17));
    assert_eq!(receipt.currency, Currency::Usd);
    assert_eq!(receipt.total_amount, dec!(30.00));
    assert_eq!(receipt.line_count, 2);

    // The submitted payload carried converted unit prices and the total.
    let submission = submitted_order(&env.upstream).await;
    assert_eq!(submission.total_amount, dec!(30.00));
    assert_eq!(submission.order_items.len(), 2);
    assert_eq!(submission.order_items[0].menu_item, 1);
    assert_eq!(submission.order_items[0].unit_price, dec!(10.00));
    assert_eq!(submission.order_items[1].unit_price, dec!(10));
    assert!(submission
        .order_items
        .iter()
        .all(|line| line.item_currency == Currency::Usd));

    // Cart cleared, draft back to defaults.
    let cart = get_cart(&env).await;
    assert!(cart.lines.is_empty());
    assert_eq!(cart.total_amount, dec!(0));

    let draft: OrderDraftMeta = env
        .client
        .get(format!("{}/api/order/draft", env.base_url))
        .send()
        .await
        .expect("Failed to get draft")
        .json()
        .await
        .expect("Failed to parse draft");
    assert!(draft.customer_id.is_empty());
    assert!(draft.customer_name.is_empty());
    assert_eq!(draft.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_submission_in_php_converts_payload() {
    let env = TestEnvironment::new().await;
    fill_reference_cart(&env).await;
    set_customer_draft(&env).await;

    env.client
        .put(format!("{}/api/settings/currency", env.base_url))
        .json(&json!({"currency": "PHP"}))
        .send()
        .await
        .expect("Failed to set currency");

    Mock::given(method("POST"))
        .and(path("/orders/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 18})))
        .expect(1)
        .mount(&env.upstream)
        .await;

    let response = env
        .client
        .post(format!("{}/api/order/submit", env.base_url))
        .send()
        .await
        .expect("Failed to submit order");
    assert_eq!(response.status().as_u16(), 201);

    let submission = submitted_order(&env.upstream).await;
    assert_eq!(submission.currency, Currency::Php);
    assert_eq!(submission.total_amount, dec!(1695.000));
    assert_eq!(submission.order_items[0].unit_price, dec!(565.000));
    assert_eq!(submission.order_items[1].unit_price, dec!(565.00));
}

#[tokio::test]
async fn test_failed_submission_preserves_cart_and_draft() {
    let env = TestEnvironment::new().await;
    fill_reference_cart(&env).await;
    set_customer_draft(&env).await;

    Mock::given(method("POST"))
        .and(path("/orders/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"order_items":["Invalid menu item."]}"#),
        )
        .expect(1)
        .mount(&env.upstream)
        .await;

    let response = env
        .client
        .post(format!("{}/api/order/submit", env.base_url))
        .send()
        .await
        .expect("Failed to submit order");
    assert_eq!(response.status().as_u16(), 502);

    let body: serde_json::Value = response.json().await.expect("Failed to parse error");
    // The collaborator's error detail is surfaced verbatim.
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Invalid menu item."));

    // Nothing was lost: cart and draft are exactly as before the attempt.
    let cart = get_cart(&env).await;
    assert_eq!(cart.lines.len(), 2);
    assert_eq!(cart.total_amount, dec!(30.00));

    let draft: OrderDraftMeta = env
        .client
        .get(format!("{}/api/order/draft", env.base_url))
        .send()
        .await
        .expect("Failed to get draft")
        .json()
        .await
        .expect("Failed to parse draft");
    assert_eq!(draft.customer_id, "C042");
    assert_eq!(draft.customer_name, "Maria Santos");
}

#[tokio::test]
async fn test_empty_cart_submission_fails_without_remote_call() {
    let env = TestEnvironment::new().await;
    set_customer_draft(&env).await;

    // The order endpoint must never be hit.
    Mock::given(method("POST"))
        .and(path("/orders/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&env.upstream)
        .await;

    let response = env
        .client
        .post(format!("{}/api/order/submit", env.base_url))
        .send()
        .await
        .expect("Failed to submit order");
    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse error");
    assert!(body["error"].as_str().unwrap().contains("cart is empty"));

    let cart = get_cart(&env).await;
    assert!(cart.lines.is_empty());
}

#[tokio::test]
async fn test_missing_customer_fields_block_submission_in_order() {
    let env = TestEnvironment::new().await;
    fill_reference_cart(&env).await;

    // No customer details at all: customer id is reported first.
    let response = env
        .client
        .post(format!("{}/api/order/submit", env.base_url))
        .send()
        .await
        .expect("Failed to submit order");
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("customer ID"));

    // With an id but no name, the name is reported.
    env.client
        .put(format!("{}/api/order/draft", env.base_url))
        .json(&json!({"customer_id": "C042"}))
        .send()
        .await
        .expect("Failed to update draft");

    let response = env
        .client
        .post(format!("{}/api/order/submit", env.base_url))
        .send()
        .await
        .expect("Failed to submit order");
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("customer name"));

    // The cart was never touched.
    let cart = get_cart(&env).await;
    assert_eq!(cart.lines.len(), 2);
}

#[tokio::test]
async fn test_quantity_updates_and_removal() {
    let env = TestEnvironment::new().await;
    env.mount_menu_item(menu_item_json(1, "Cheeseburger", "10.00", None))
        .await;

    env.client
        .post(format!("{}/api/cart/items", env.base_url))
        .json(&json!({"item_id": 1}))
        .send()
        .await
        .expect("Failed to add item");

    // Bump the quantity.
    let response = env
        .client
        .put(format!("{}/api/cart/items/1", env.base_url))
        .json(&json!({"quantity": 5}))
        .send()
        .await
        .expect("Failed to update quantity");
    assert_eq!(response.status().as_u16(), 200);
    let cart: CartResponse = response.json().await.unwrap();
    assert_eq!(cart.lines[0].quantity, 5);

    // Updating an absent line is a no-op, not an error.
    let response = env
        .client
        .put(format!("{}/api/cart/items/999", env.base_url))
        .json(&json!({"quantity": 3}))
        .send()
        .await
        .expect("Failed to update absent line");
    assert_eq!(response.status().as_u16(), 200);
    let cart: CartResponse = response.json().await.unwrap();
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].quantity, 5);

    // Quantity below 1 removes the line.
    let response = env
        .client
        .put(format!("{}/api/cart/items/1", env.base_url))
        .json(&json!({"quantity": 0}))
        .send()
        .await
        .expect("Failed to remove via quantity");
    let cart: CartResponse = response.json().await.unwrap();
    assert!(cart.lines.is_empty());
}

#[tokio::test]
async fn test_adding_unsupported_currency_item_is_rejected() {
    let env = TestEnvironment::new().await;
    env.mount_menu_item(menu_item_json(3, "Imported wine", "30.00", Some("EUR")))
        .await;

    let response = env
        .client
        .post(format!("{}/api/cart/items", env.base_url))
        .json(&json!({"item_id": 3}))
        .send()
        .await
        .expect("Failed to send add request");
    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("EUR"));

    let cart = get_cart(&env).await;
    assert!(cart.lines.is_empty());
}

#[tokio::test]
async fn test_menu_proxy_and_availability_filter() {
    let env = TestEnvironment::new().await;

    let mut unavailable = menu_item_json(2, "Out of stock special", "15.00", None);
    unavailable["is_available"] = json!(false);
    Mock::given(method("GET"))
        .and(path("/menu/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            menu_item_json(1, "Cheeseburger", "10.00", None),
            unavailable
        ])))
        .mount(&env.upstream)
        .await;

    let body: serde_json::Value = env
        .client
        .get(format!("{}/api/menu?available_only=true", env.base_url))
        .send()
        .await
        .expect("Failed to list menu")
        .json()
        .await
        .expect("Failed to parse menu");

    assert_eq!(body["total_count"], 1);
    assert_eq!(body["items"][0]["name"], "Cheeseburger");
}

#[tokio::test]
async fn test_health_and_metrics_endpoints() {
    let env = TestEnvironment::new().await;

    let response = env
        .client
        .get(format!("{}/health/status", env.base_url))
        .send()
        .await
        .expect("Failed to check health");
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");

    let response = env
        .client
        .get(format!("{}/metrics", env.base_url))
        .send()
        .await
        .expect("Failed to fetch metrics");
    assert_eq!(response.status().as_u16(), 200);
    let text = response.text().await.unwrap();
    assert!(text.contains("http_requests_total"));
}
