//! Request extractors: the caller's session and JSON bodies with uniform errors.
use super::{error::ApiError, AppState};
use crate::auth::{AuthError, Session};
use crate::model::{AccountId, Role};
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;

/// The authenticated caller, taken from `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Copy)]
pub struct AuthSession(pub Session);

impl AuthSession {
    pub fn account_id(&self) -> AccountId {
        self.0.account_id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    /// Fails with `Forbidden` unless the session belongs to `role`.
    pub fn require(self, role: Role) -> Result<Self, ApiError> {
        if self.0.role == role {
            Ok(self)
        } else {
            Err(ApiError::Forbidden(format!("Not authorized as a {role}")))
        }
    }

    /// Fails with `Forbidden` unless the session belongs to one of `roles`.
    pub fn require_any(self, roles: &[Role]) -> Result<Self, ApiError> {
        if roles.contains(&self.0.role) {
            Ok(self)
        } else {
            Err(ApiError::Forbidden("Not authorized for this action".into()))
        }
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let session = state.sessions.verify(token)?;
        Ok(AuthSession(session))
    }
}

/// `Json<T>` whose rejections render as `400 {"message": ...}`.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

/// `Path<T>` whose rejections render as JSON. An id that does not parse
/// cannot name a stored entity, so it is reported as `404`.
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(ApiPath(value))
    }
}
