//! Invoice ledger: creation, validation and lookup of invoices.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{AppError, ValidationError};
use crate::ids::IdGenerator;
use crate::models::{Invoice, NewInvoice};
use crate::store::Store;

/// Returned after an invoice is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceCreated {
    pub invoice_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct InvoiceLedger {
    store: Arc<dyn Store>,
    ids: Arc<dyn IdGenerator>,
}

impl InvoiceLedger {
    pub fn new(store: Arc<dyn Store>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// Validates and persists a new unpaid invoice.
    pub async fn create(&self, new: NewInvoice) -> Result<InvoiceCreated, AppError> {
        validate_amount(new.amount)?;
        validate_currency(&new.currency)?;

        let invoice = Invoice::unpaid(self.ids.invoice_id(), new, Utc::now());
        self.store.insert_invoice(&invoice).await?;

        tracing::info!(
            invoice_id = %invoice.id,
            merchant_id = %invoice.merchant_id,
            amount = invoice.amount,
            currency = %invoice.currency,
            "Invoice created"
        );

        Ok(InvoiceCreated {
            invoice_id: invoice.id,
            created_at: invoice.created_at,
        })
    }

    pub async fn get(&self, invoice_id: &str) -> Result<Invoice, AppError> {
        self.store
            .get_invoice(invoice_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Invoice not found: {}", invoice_id)))
    }
}

fn validate_amount(amount: i64) -> Result<(), ValidationError> {
    if amount <= 0 {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(())
}

/// Exactly three ASCII uppercase letters. Not checked against a code list.
fn validate_currency(currency: &str) -> Result<(), ValidationError> {
    if currency.len() == 3 && currency.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCurrency)
    }
}
