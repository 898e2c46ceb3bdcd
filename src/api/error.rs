//! API error type and its HTTP mapping.
//!
//! Every failure becomes `{ "message": ..., "code": ... }` with the matching status:
//! invalid input 400, not found 404, unauthorized 401, expired 400, anything else 500.

use crate::cart_actor::CartError;
use crate::order_actor::OrderError;
use crate::projection::ProjectionError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Expired(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    code: &'static str,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Expired(_) => "EXPIRED",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::Expired(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            message,
            code: self.code(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<CartError> for ApiError {
    fn from(e: CartError) -> Self {
        let message = e.to_string();
        match e {
            CartError::InvalidQuantity(_) | CartError::MealUnavailable(_) | CartError::UnknownPromo(_) => {
                ApiError::InvalidInput(message)
            }
            CartError::CartNotFound(_) | CartError::ItemNotFound(_) | CartError::MealNotFound(_) => {
                ApiError::NotFound(message)
            }
            CartError::PromoExpired(_) => ApiError::Expired(message),
            CartError::ActorCommunicationError(_) => ApiError::Internal(message),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        let message = e.to_string();
        match e {
            OrderError::EmptyOrder | OrderError::ValidationError(_) => ApiError::InvalidInput(message),
            OrderError::NotFound(_) | OrderError::MealNotFound(_) => ApiError::NotFound(message),
            OrderError::Unauthorized(_) => ApiError::Unauthorized(message),
            OrderError::ActorCommunicationError(_) => ApiError::Internal(message),
        }
    }
}

impl From<ProjectionError> for ApiError {
    fn from(e: ProjectionError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}
