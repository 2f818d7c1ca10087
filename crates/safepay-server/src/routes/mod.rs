//! API routes for the Safepay server.

pub mod invoices;
pub mod payments;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::ids::IdGenerator;
use crate::ledger::InvoiceLedger;
use crate::processor::PaymentProcessor;
use crate::settlement::SettlementGateway;
use crate::store::Store;

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub ledger: InvoiceLedger,
    pub processor: PaymentProcessor,
}

impl AppState {
    /// Wires the ledger and processor over one store and id source.
    pub fn new(
        store: Arc<dyn Store>,
        ids: Arc<dyn IdGenerator>,
        gateway: Arc<dyn SettlementGateway>,
    ) -> Self {
        Self {
            ledger: InvoiceLedger::new(store.clone(), ids.clone()),
            processor: PaymentProcessor::new(store, ids, gateway),
        }
    }
}

/// Creates the main API router with all routes mounted.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/invoices", invoices::router(state.clone()))
        .nest("/payments", payments::router(state))
        .layer(TraceLayer::new_for_http())
}
