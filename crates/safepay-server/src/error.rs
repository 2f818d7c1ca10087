//! Error types for the Safepay server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Malformed or out-of-range input. Raised before storage is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Currency must be a 3-letter uppercase code (e.g. USD)")]
    InvalidCurrency,

    #[error("Card number must be 16 digits")]
    InvalidCardNumber,

    #[error("Expiry must be in MM/YY or MM/YYYY format")]
    InvalidExpiry,

    #[error("CVV must be at least 3 digits")]
    InvalidCvv,
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    #[error("Invoice already paid: {0}")]
    AlreadyPaid(String),

    /// Expected settlement outcome. The caller may retry.
    #[error("Payment declined for invoice {0}")]
    PaymentDeclined(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl AppError {
    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::PaymentDeclined(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            AppError::InvoiceNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Invoice not found: {}", id)).into_response()
            }
            AppError::AlreadyPaid(id) => {
                (StatusCode::CONFLICT, format!("Invoice {} is already paid", id)).into_response()
            }
            AppError::PaymentDeclined(_) => {
                (StatusCode::PAYMENT_REQUIRED, "Payment declined").into_response()
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
