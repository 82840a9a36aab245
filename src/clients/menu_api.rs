use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{info, instrument, Instrument};

use super::{api_span, decode_json, ensure_success, send};
use crate::models::{ApiResult, CreateMenuItemRequest, MenuItem, UpdateMenuItemRequest};

/// Trait defining access to the remote menu API
#[async_trait]
pub trait MenuApi: Send + Sync {
    /// Fetch the full menu.
    async fn list_items(&self) -> ApiResult<Vec<MenuItem>>;

    /// Fetch a single menu item, `None` when the remote API has no such item.
    async fn get_item(&self, item_id: i64) -> ApiResult<Option<MenuItem>>;

    /// Create a menu item.
    async fn create_item(&self, request: &CreateMenuItemRequest) -> ApiResult<MenuItem>;

    /// Update a menu item.
    async fn update_item(
        &self,
        item_id: i64,
        request: &UpdateMenuItemRequest,
    ) -> ApiResult<MenuItem>;

    /// Delete a menu item.
    async fn delete_item(&self, item_id: i64) -> ApiResult<()>;
}

/// reqwest-backed implementation against the configured base URL
pub struct HttpMenuApi {
    client: Client,
    base_url: String,
}

impl HttpMenuApi {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/menu/{}", self.base_url.trim_end_matches('/'), suffix)
    }
}

#[async_trait]
impl MenuApi for HttpMenuApi {
    #[instrument(skip(self))]
    async fn list_items(&self) -> ApiResult<Vec<MenuItem>> {
        let url = self.url("");
        let span = api_span("ListMenu", "GET", &url);

        let items: Vec<MenuItem> = async {
            let response = send(&url, self.client.get(&url)).await?;
            let response = ensure_success(&url, response).await?;
            decode_json(&url, response).await
        }
        .instrument(span)
        .await?;

        info!("Fetched {} menu items", items.len());
        Ok(items)
    }

    #[instrument(skip(self), fields(item_id = %item_id))]
    async fn get_item(&self, item_id: i64) -> ApiResult<Option<MenuItem>> {
        let url = self.url(&format!("{}/", item_id));
        let span = api_span("GetMenuItem", "GET", &url);

        async {
            let response = send(&url, self.client.get(&url)).await?;
            if response.status() == StatusCode::NOT_FOUND {
                info!("Menu item not found upstream");
                return Ok(None);
            }
            let response = ensure_success(&url, response).await?;
            let item = decode_json(&url, response).await?;
            Ok(Some(item))
        }
        .instrument(span)
        .await
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create_item(&self, request: &CreateMenuItemRequest) -> ApiResult<MenuItem> {
        let url = self.url("");
        let span = api_span("CreateMenuItem", "POST", &url);

        let item: MenuItem = async {
            let response = send(&url, self.client.post(&url).json(request)).await?;
            let response = ensure_success(&url, response).await?;
            decode_json(&url, response).await
        }
        .instrument(span)
        .await?;

        info!(item_id = item.id, "Menu item created");
        Ok(item)
    }

    #[instrument(skip(self, request), fields(item_id = %item_id))]
    async fn update_item(
        &self,
        item_id: i64,
        request: &UpdateMenuItemRequest,
    ) -> ApiResult<MenuItem> {
        let url = self.url(&format!("{}/", item_id));
        let span = api_span("UpdateMenuItem", "PUT", &url);

        let item: MenuItem = async {
            let response = send(&url, self.client.put(&url).json(request)).await?;
            let response = ensure_success(&url, response).await?;
            decode_json(&url, response).await
        }
        .instrument(span)
        .await?;

        info!("Menu item updated");
        Ok(item)
    }

    #[instrument(skip(self), fields(item_id = %item_id))]
    async fn delete_item(&self, item_id: i64) -> ApiResult<()> {
        let url = self.url(&format!("{}/", item_id));
        let span = api_span("DeleteMenuItem", "DELETE", &url);

        async {
            let response = send(&url, self.client.delete(&url)).await?;
            ensure_success(&url, response).await?;
            Ok(())
        }
        .instrument(span)
        .await?;

        info!("Menu item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApiError;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn menu_item_body(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Adobo",
            "description": "Braised pork",
            "price": "185.00",
            "category": "FOOD",
            "currency": "PHP",
            "is_available": true
        })
    }

    #[tokio::test]
    async fn test_list_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/menu/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([menu_item_body(1), menu_item_body(2)])),
            )
            .mount(&server)
            .await;

        let api = HttpMenuApi::new(Client::new(), server.uri());
        let items = api.list_items().await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Adobo");
    }

    #[tokio::test]
    async fn test_get_item_maps_404_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/menu/99/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let api = HttpMenuApi::new(Client::new(), server.uri());
        let item = api.get_item(99).await.unwrap();
        assert!(item.is_none());
    }

    #[tokio::test]
    async fn test_get_item_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/menu/1/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(menu_item_body(1)))
            .mount(&server)
            .await;

        let api = HttpMenuApi::new(Client::new(), server.uri());
        let item = api.get_item(1).await.unwrap().unwrap();
        assert_eq!(item.id, 1);
        assert_eq!(item.currency.as_deref(), Some("PHP"));
    }

    #[tokio::test]
    async fn test_server_error_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/menu/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let api = HttpMenuApi::new(Client::new(), server.uri());
        let err = api.list_items().await.unwrap_err();

        match err {
            ApiError::Status { status, body, .. } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
    }
}
