use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::clients::MenuApi;
use crate::models::{
    CreateMenuItemRequest, MenuCategory, MenuItem, MenuListResponse, ServiceError, ServiceResult,
    UpdateMenuItemRequest, Validate,
};

/// Service fronting the remote menu API
pub struct MenuService {
    menu_api: Arc<dyn MenuApi>,
}

impl MenuService {
    pub fn new(menu_api: Arc<dyn MenuApi>) -> Self {
        Self { menu_api }
    }

    /// List menu items, optionally narrowed to one category or to items
    /// currently available for ordering.
    #[instrument(skip(self), fields(category = ?category, available_only = available_only))]
    pub async fn list_items(
        &self,
        category: Option<MenuCategory>,
        available_only: bool,
    ) -> ServiceResult<MenuListResponse> {
        let items = self.menu_api.list_items().await?;

        let items: Vec<MenuItem> = items
            .into_iter()
            .filter(|item| {
                category
                    .as_ref()
                    .map(|wanted| &item.category == wanted)
                    .unwrap_or(true)
            })
            .filter(|item| !available_only || item.is_available)
            .collect();

        let total_count = items.len();
        info!("Listed {} menu items", total_count);

        Ok(MenuListResponse { items, total_count })
    }

    /// Fetch a single menu item.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn get_item(&self, item_id: i64) -> ServiceResult<MenuItem> {
        match self.menu_api.get_item(item_id).await? {
            Some(item) => Ok(item),
            None => {
                warn!("Menu item not found");
                Err(ServiceError::MenuItemNotFound { item_id })
            }
        }
    }

    /// Create a menu item through the admin surface.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_item(&self, request: CreateMenuItemRequest) -> ServiceResult<MenuItem> {
        request.validate()?;

        let item = self.menu_api.create_item(&request).await?;
        info!(item_id = item.id, "Menu item created");
        Ok(item)
    }

    /// Update a menu item through the admin surface.
    #[instrument(skip(self, request), fields(item_id = %item_id))]
    pub async fn update_item(
        &self,
        item_id: i64,
        request: UpdateMenuItemRequest,
    ) -> ServiceResult<MenuItem> {
        request.validate()?;

        let item = self.menu_api.update_item(item_id, &request).await?;
        info!("Menu item updated");
        Ok(item)
    }

    /// Delete a menu item through the admin surface.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn delete_item(&self, item_id: i64) -> ServiceResult<()> {
        self.menu_api.delete_item(item_id).await?;
        info!("Menu item deleted");
        Ok(())
    }
}
