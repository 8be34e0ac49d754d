use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};

use crate::api::response;

pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";
pub const NOT_FOUND_MESSAGE: &str = "endpoint not found";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Route not found: {0}")]
    NotFound(String),

    #[error("Invalid target URL: {0}")]
    InvalidUrl(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidUrl(_) | AppError::Internal(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            AppError::Validation(msg) => msg,
            AppError::NotFound(path) => {
                tracing::debug!("No route for {}", path);
                NOT_FOUND_MESSAGE.to_string()
            }
            other => {
                // Raw details stay in the server log.
                tracing::error!("Request failed: {}", other);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        response::error(status, message).into_response()
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            AppError::Internal(panic_message(err.into_panic().as_ref()))
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
