//! Registration, login and profile endpoints for all three roles.
use super::{
    error::ApiError,
    session::{ApiJson, AuthSession},
    AppState,
};
use crate::model::{
    Account, AccountProfile, CourierProfile, CustomerProfile, RegisterAccount, RestaurantProfile,
    Role,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Shared registration fields plus the role's own profile fields.
#[derive(Debug, Deserialize)]
pub struct RegisterBody<P> {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(flatten)]
    pub profile: P,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSignup {
    #[serde(default)]
    pub cuisine_type: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// The account as the owner sees it, plus a fresh session token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub account: Account,
    pub token: String,
}

fn respond(state: &AppState, account: Account) -> Result<Json<AuthResponse>, ApiError> {
    let token = state.sessions.issue(account.id, account.role)?;
    Ok(Json(AuthResponse { account, token }))
}

async fn register(
    state: &AppState,
    name: String,
    email: String,
    password: String,
    profile: AccountProfile,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let account = state
        .accounts
        .register(RegisterAccount {
            name,
            email,
            password,
            profile,
        })
        .await?;
    Ok((StatusCode::CREATED, respond(state, account)?))
}

async fn login(
    state: &AppState,
    body: LoginBody,
    role: Role,
) -> Result<Json<AuthResponse>, ApiError> {
    let account = state
        .accounts
        .authenticate(&body.email, &body.password, role)
        .await?;
    respond(state, account)
}

async fn own_profile(
    state: &AppState,
    session: AuthSession,
    role: Role,
) -> Result<Json<Account>, ApiError> {
    let session = session.require(role)?;
    let account = state
        .accounts
        .profile(session.account_id())
        .await
        .map_err(|_| ApiError::Unauthorized("Not authorized, account not found".into()))?;
    Ok(Json(account))
}

pub async fn register_customer(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterBody<CustomerProfile>>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let profile = AccountProfile::Customer(body.profile);
    register(&state, body.name, body.email, body.password, profile).await
}

pub async fn register_restaurant(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterBody<RestaurantSignup>>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let signup = body.profile;
    let profile = AccountProfile::Restaurant(RestaurantProfile::new(
        signup.cuisine_type,
        signup.address,
        signup.description,
    ));
    register(&state, body.name, body.email, body.password, profile).await
}

pub async fn register_courier(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterBody<CourierProfile>>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let profile = AccountProfile::Courier(body.profile);
    register(&state, body.name, body.email, body.password, profile).await
}

pub async fn login_customer(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginBody>,
) -> Result<Json<AuthResponse>, ApiError> {
    login(&state, body, Role::Customer).await
}

pub async fn login_restaurant(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginBody>,
) -> Result<Json<AuthResponse>, ApiError> {
    login(&state, body, Role::Restaurant).await
}

pub async fn login_courier(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginBody>,
) -> Result<Json<AuthResponse>, ApiError> {
    login(&state, body, Role::Delivery).await
}

pub async fn customer_profile(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<Account>, ApiError> {
    own_profile(&state, session, Role::Customer).await
}

pub async fn restaurant_profile(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<Account>, ApiError> {
    own_profile(&state, session, Role::Restaurant).await
}

pub async fn courier_profile(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<Account>, ApiError> {
    own_profile(&state, session, Role::Delivery).await
}
