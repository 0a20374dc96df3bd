use super::{
    error::ApiError,
    session::{ApiJson, ApiPath, AuthSession},
    AppState,
};
use crate::model::{Account, AccountId, RestaurantUpdate, Role};
use axum::{
    extract::State,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Account>>, ApiError> {
    Ok(Json(state.accounts.list_active_restaurants().await?))
}

pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u32>,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(state.accounts.active_restaurant(AccountId(id)).await?))
}

pub async fn update(
    State(state): State<AppState>,
    session: AuthSession,
    ApiPath(id): ApiPath<u32>,
    ApiJson(update): ApiJson<RestaurantUpdate>,
) -> Result<Json<Account>, ApiError> {
    let session = session.require(Role::Restaurant)?;
    let account = state
        .accounts
        .update_restaurant(AccountId(id), session.account_id(), update)
        .await?;
    Ok(Json(account))
}
