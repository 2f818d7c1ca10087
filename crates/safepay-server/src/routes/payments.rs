//! Payment endpoints.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use super::AppState;
use crate::error::AppError;
use crate::models::PaymentAttempt;
use crate::processor::{PaymentResult, PaymentStatusView};

/// Creates the payments router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(process_payment))
        .route("/{invoice_id}", get(get_payment_status))
        .with_state(state)
}

/// POST /payments
///
/// Submits a payment attempt. A declined settlement answers 402 and may be retried.
async fn process_payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentAttempt>,
) -> Result<Json<PaymentResult>, AppError> {
    Ok(Json(state.processor.process(request).await?))
}

/// GET /payments/{invoice_id}
///
/// Returns the most recent payment recorded for the invoice.
async fn get_payment_status(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
) -> Result<Json<PaymentStatusView>, AppError> {
    Ok(Json(state.processor.get_status(&invoice_id).await?))
}
