// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
///
/// The payload of each variant is a detail for the logs. Clients only ever
/// see the fixed message of the variant's status class.
#[derive(Debug)]
pub enum AppError {
    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 405 Method Not Allowed
    MethodNotAllowed,

    // 422 Unprocessable Entity
    Unprocessable(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

/// Body of every failed response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub success: bool,
    /// HTTP status code, repeated in the body.
    pub error: u16,
    pub message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad request",
            AppError::NotFound(_) => "resource not found",
            AppError::MethodNotAllowed => "method not allowed",
            AppError::Unprocessable(_) => "unprocessable",
            AppError::InternalServerError(_) => "internal server error",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            success: false,
            error: self.status().as_u16(),
            message: self.message().to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InternalServerError(detail) => {
                tracing::error!("Internal Server Error: {}", detail);
            }
            AppError::BadRequest(detail)
            | AppError::NotFound(detail)
            | AppError::Unprocessable(detail) => {
                tracing::debug!(status = self.status().as_u16(), "{}", detail);
            }
            AppError::MethodNotAllowed => {}
        }

        (self.status(), Json(self.body())).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("no route matched".to_string())
}

/// Fallback for known routes hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
