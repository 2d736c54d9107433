use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::{AccountError, BookingError};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(what: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("{} not found", what))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({"error": self.message}))).into_response()
    }
}

impl From<StatusCode> for ApiError {
    fn from(status: StatusCode) -> Self {
        Self {
            status,
            message: status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        error!("Internal error: {:#}", err);
        StatusCode::INTERNAL_SERVER_ERROR.into()
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        let status = match &err {
            BookingError::EventPassed | BookingError::TooLateToCancel => StatusCode::BAD_REQUEST,
            BookingError::EventFull { .. } | BookingError::DuplicateBooking { .. } => {
                StatusCode::CONFLICT
            }
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Database(db_err) => {
                error!("Booking failed: {}", db_err);
                return Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred during booking.",
                );
            }
        };

        Self::new(status, err.to_string())
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        let status = match &err {
            AccountError::Validation(_) => StatusCode::BAD_REQUEST,
            AccountError::UsernameTaken(_) => StatusCode::CONFLICT,
            AccountError::NotFound => StatusCode::NOT_FOUND,
            AccountError::Database(_) | AccountError::Internal(_) => {
                error!("Account operation failed: {}", err);
                return StatusCode::INTERNAL_SERVER_ERROR.into();
            }
        };

        Self::new(status, err.to_string())
    }
}
