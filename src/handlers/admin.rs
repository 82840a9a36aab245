use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::api::service_error_to_response;
use crate::models::{CreateMenuItemRequest, MenuItem, UpdateMenuItemRequest};
use crate::observability::Metrics;
use crate::services::MenuService;

/// Admin state containing the menu pass-through service
#[derive(Clone)]
pub struct AdminState {
    pub menu_service: Arc<MenuService>,
    pub metrics: Arc<Metrics>,
}

/// Create a menu item on the remote API
#[instrument(name = "create_menu_item", skip(state, request), fields(name = %request.name))]
pub async fn create_menu_item(
    State(state): State<AdminState>,
    Json(request): Json<CreateMenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItem>), (StatusCode, Json<Value>)> {
    info!("Creating menu item");

    let result = state.menu_service.create_item(request).await;
    state.metrics.record_menu_operation("create", result.is_ok());

    match result {
        Ok(item) => {
            info!(item_id = item.id, "Menu item created");
            Ok((StatusCode::CREATED, Json(item)))
        }
        Err(err) => {
            error!("Failed to create menu item: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Update a menu item on the remote API
#[instrument(name = "update_menu_item", skip(state, request), fields(item_id = %item_id))]
pub async fn update_menu_item(
    State(state): State<AdminState>,
    Path(item_id): Path<i64>,
    Json(request): Json<UpdateMenuItemRequest>,
) -> Result<Json<MenuItem>, (StatusCode, Json<Value>)> {
    info!("Updating menu item");

    let result = state.menu_service.update_item(item_id, request).await;
    state.metrics.record_menu_operation("update", result.is_ok());

    match result {
        Ok(item) => {
            info!("Menu item updated");
            Ok(Json(item))
        }
        Err(err) => {
            error!("Failed to update menu item: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Delete a menu item on the remote API
#[instrument(name = "delete_menu_item", skip(state), fields(item_id = %item_id))]
pub async fn delete_menu_item(
    State(state): State<AdminState>,
    Path(item_id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    info!("Deleting menu item");

    let result = state.menu_service.delete_item(item_id).await;
    state.metrics.record_menu_operation("delete", result.is_ok());

    match result {
        Ok(()) => {
            info!("Menu item deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => {
            error!("Failed to delete menu item: {}", err);
            Err(service_error_to_response(err))
        }
    }
}
