use super::{
    error::ApiError,
    session::{ApiJson, ApiPath, AuthSession},
    AppState,
};
use crate::model::{AccountId, MenuItem, MenuItemId, MenuItemUpdate, NewMenuItem, Role};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

pub async fn list(
    State(state): State<AppState>,
    ApiPath(restaurant_id): ApiPath<u32>,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    let items = state
        .menu
        .list_for_restaurant(AccountId(restaurant_id))
        .await?;
    Ok(Json(items))
}

pub async fn create(
    State(state): State<AppState>,
    session: AuthSession,
    ApiJson(item): ApiJson<NewMenuItem>,
) -> Result<(StatusCode, Json<MenuItem>), ApiError> {
    let session = session.require(Role::Restaurant)?;
    let item = state.menu.create_item(session.account_id(), item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update(
    State(state): State<AppState>,
    session: AuthSession,
    ApiPath(id): ApiPath<u32>,
    ApiJson(update): ApiJson<MenuItemUpdate>,
) -> Result<Json<MenuItem>, ApiError> {
    let session = session.require(Role::Restaurant)?;
    let item = state
        .menu
        .update_item(MenuItemId(id), session.account_id(), update)
        .await?;
    Ok(Json(item))
}

pub async fn remove(
    State(state): State<AppState>,
    session: AuthSession,
    ApiPath(id): ApiPath<u32>,
) -> Result<Json<Value>, ApiError> {
    let session = session.require(Role::Restaurant)?;
    state
        .menu
        .delete_item(MenuItemId(id), session.account_id())
        .await?;
    Ok(Json(json!({ "message": "Menu item removed" })))
}
