//! Invoice endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::AppState;
use crate::error::AppError;
use crate::ledger::InvoiceCreated;
use crate::models::{Invoice, NewInvoice};

/// Creates the invoices router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(create_invoice))
        .route("/{id}", get(get_invoice))
        .with_state(state)
}

/// POST /invoices
///
/// Creates an unpaid invoice and returns its id and creation time.
async fn create_invoice(
    State(state): State<AppState>,
    Json(request): Json<NewInvoice>,
) -> Result<(StatusCode, Json<InvoiceCreated>), AppError> {
    let created = state.ledger.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /invoices/{id}
async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Invoice>, AppError> {
    Ok(Json(state.ledger.get(&id).await?))
}
