use super::{
    error::ApiError,
    session::{ApiJson, ApiPath, AuthSession},
    AppState,
};
use crate::model::{Order, OrderId, OrderStatus, OrderView, PlaceOrder, Role};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: OrderStatus,
}

pub async fn place(
    State(state): State<AppState>,
    session: AuthSession,
    ApiJson(request): ApiJson<PlaceOrder>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let session = session.require(Role::Customer)?;
    let order = state
        .orders
        .place_order(session.account_id(), request)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn for_customer(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    let session = session.require(Role::Customer)?;
    Ok(Json(
        state.orders.list_for_customer(session.account_id()).await?,
    ))
}

pub async fn for_restaurant(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    let session = session.require(Role::Restaurant)?;
    Ok(Json(
        state.orders.list_for_restaurant(session.account_id()).await?,
    ))
}

pub async fn available(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    session.require(Role::Delivery)?;
    Ok(Json(state.orders.available_for_delivery().await?))
}

pub async fn active(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    let session = session.require(Role::Delivery)?;
    Ok(Json(
        state.orders.active_deliveries(session.account_id()).await?,
    ))
}

pub async fn set_status(
    State(state): State<AppState>,
    session: AuthSession,
    ApiPath(id): ApiPath<u32>,
    ApiJson(body): ApiJson<StatusBody>,
) -> Result<Json<Order>, ApiError> {
    let session = session.require_any(&[Role::Restaurant, Role::Delivery])?;
    let order = state
        .orders
        .set_status(OrderId(id), session.account_id(), session.role(), body.status)
        .await?;
    Ok(Json(order))
}

pub async fn accept(
    State(state): State<AppState>,
    session: AuthSession,
    ApiPath(id): ApiPath<u32>,
) -> Result<Json<Order>, ApiError> {
    let session = session.require(Role::Delivery)?;
    let order = state
        .orders
        .accept(OrderId(id), session.account_id())
        .await?;
    Ok(Json(order))
}
