use crate::account_actor::AccountError;
use crate::auth::AuthError;
use crate::menu_actor::MenuError;
use crate::order_actor::OrderError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Every failure a handler can return, rendered as `{"message": ...}`.
#[derive(Error, Debug, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(_) => {
                ApiError::NotFound("Resource not found".into())
            }
            other => ApiError::Internal(other.body_text()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidKey | AuthError::Hashing(_) => ApiError::Internal(e.to_string()),
            AuthError::MissingToken => ApiError::Unauthorized("Not authorized, no token".into()),
            _ => ApiError::Unauthorized("Not authorized, token failed".into()),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        let message = e.to_string();
        match e {
            AccountError::NotFound(_) | AccountError::RestaurantUnavailable(_) => {
                ApiError::NotFound(message)
            }
            AccountError::EmailTaken(_) => ApiError::Conflict(message),
            AccountError::InvalidCredentials => ApiError::Unauthorized(message),
            AccountError::Forbidden(_) => ApiError::Forbidden(message),
            AccountError::ValidationError(_) => ApiError::InvalidRequest(message),
            AccountError::Credential(_) | AccountError::ActorCommunicationError(_) => {
                ApiError::Internal(message)
            }
        }
    }
}

impl From<MenuError> for ApiError {
    fn from(e: MenuError) -> Self {
        let message = e.to_string();
        match e {
            MenuError::NotFound(_) => ApiError::NotFound(message),
            MenuError::Forbidden(_) => ApiError::Forbidden(message),
            MenuError::ValidationError(_) => ApiError::InvalidRequest(message),
            MenuError::ActorCommunicationError(_) => ApiError::Internal(message),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        let message = e.to_string();
        match e {
            OrderError::NotFound(_) | OrderError::RestaurantUnavailable => {
                ApiError::NotFound(message)
            }
            OrderError::EmptyOrder
            | OrderError::InvalidItem(_)
            | OrderError::ValidationError(_)
            | OrderError::Finalized(_)
            | OrderError::InvalidTransition { .. }
            | OrderError::NotReadyForPickup(_) => ApiError::InvalidRequest(message),
            OrderError::Forbidden(_) => ApiError::Forbidden(message),
            OrderError::StatusChanged { .. } | OrderError::AlreadyClaimed => {
                ApiError::Conflict(message)
            }
            OrderError::ActorCommunicationError(_) => ApiError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderStatus;

    #[test]
    fn domain_errors_map_to_their_kinds() {
        assert_eq!(
            ApiError::from(AccountError::EmailTaken("account_1".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(AccountError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(MenuError::Forbidden("update this menu item".into())).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(OrderError::RestaurantUnavailable).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(OrderError::Finalized(OrderStatus::Delivered)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(OrderError::AlreadyClaimed).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(AuthError::Expired).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn messages_pass_through_verbatim() {
        let err = ApiError::from(OrderError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Preparing,
        });
        assert_eq!(
            err.to_string(),
            "Invalid status transition: cannot move from Pending to Preparing"
        );
        let err = ApiError::from(OrderError::Finalized(OrderStatus::Cancelled));
        assert_eq!(
            err.to_string(),
            "Order is already Cancelled and cannot be updated."
        );
    }
}
