//! Payment processor: validates attempts, settles them and records the result.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{AppError, ValidationError};
use crate::ids::IdGenerator;
use crate::models::{CardDetails, Payment, PaymentAttempt, PaymentStatus};
use crate::settlement::{SettlementGateway, SettlementOutcome, SettlementRequest};
use crate::store::{SettlementWrite, Store};

/// Method name that requires card fields.
pub const CARD_METHOD: &str = "card";

const CARD_NUMBER_LEN: usize = 16;
const MIN_CVV_LEN: usize = 3;

/// Outcome of a successful payment.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResult {
    pub payment_id: String,
    pub status: PaymentStatus,
    pub paid_at: DateTime<Utc>,
}

/// Latest payment recorded for an invoice.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentStatusView {
    pub invoice_id: String,
    pub payment_id: String,
    pub status: PaymentStatus,
    pub paid_at: DateTime<Utc>,
}

impl From<Payment> for PaymentStatusView {
    fn from(payment: Payment) -> Self {
        Self {
            invoice_id: payment.invoice_id,
            payment_id: payment.id,
            status: payment.status,
            paid_at: payment.paid_at,
        }
    }
}

#[derive(Clone)]
pub struct PaymentProcessor {
    store: Arc<dyn Store>,
    ids: Arc<dyn IdGenerator>,
    gateway: Arc<dyn SettlementGateway>,
}

impl PaymentProcessor {
    pub fn new(
        store: Arc<dyn Store>,
        ids: Arc<dyn IdGenerator>,
        gateway: Arc<dyn SettlementGateway>,
    ) -> Self {
        Self { store, ids, gateway }
    }

    /// Processes a payment attempt against an invoice.
    ///
    /// Steps:
    /// 1. Validate card fields (only for the `card` method)
    /// 2. Check the invoice exists and is unpaid
    /// 3. Ask the settlement gateway for an outcome
    /// 4. Record the payment and mark the invoice paid in one transaction
    ///
    /// A declined settlement writes nothing.
    pub async fn process(&self, attempt: PaymentAttempt) -> Result<PaymentResult, AppError> {
        if attempt.method == CARD_METHOD {
            validate_card(&attempt.details)?;
        }

        let invoice = self
            .store
            .get_invoice(&attempt.invoice_id)
            .await?
            .ok_or_else(|| AppError::InvoiceNotFound(attempt.invoice_id.clone()))?;

        if invoice.is_paid() {
            return Err(AppError::AlreadyPaid(invoice.id));
        }

        let request = SettlementRequest {
            invoice_id: invoice.id.clone(),
            amount: invoice.amount,
            currency: invoice.currency.clone(),
            method: attempt.method.clone(),
        };

        if self.gateway.settle(&request).await == SettlementOutcome::Declined {
            tracing::info!(
                invoice_id = %invoice.id,
                method = %attempt.method,
                "Payment declined by settlement gateway"
            );
            return Err(AppError::PaymentDeclined(invoice.id));
        }

        let payment = Payment {
            id: self.ids.payment_id(),
            invoice_id: invoice.id,
            method: attempt.method,
            status: PaymentStatus::Paid,
            paid_at: Utc::now(),
        };

        match self.store.record_settlement(&payment).await? {
            SettlementWrite::Recorded => {}
            // Lost the race to a concurrent settlement.
            SettlementWrite::AlreadyPaid => return Err(AppError::AlreadyPaid(payment.invoice_id)),
            SettlementWrite::InvoiceMissing => {
                return Err(AppError::InvoiceNotFound(payment.invoice_id))
            }
        }

        tracing::info!(
            invoice_id = %payment.invoice_id,
            payment_id = %payment.id,
            method = %payment.method,
            "Payment settled"
        );

        Ok(PaymentResult {
            payment_id: payment.id,
            status: payment.status,
            paid_at: payment.paid_at,
        })
    }

    pub async fn get_status(&self, invoice_id: &str) -> Result<PaymentStatusView, AppError> {
        self.store
            .get_latest_payment(invoice_id)
            .await?
            .map(PaymentStatusView::from)
            .ok_or_else(|| AppError::NotFound(format!("Payment not found for invoice: {}", invoice_id)))
    }
}

/// Shape checks only: no Luhn check, no calendar check on the expiry.
fn validate_card(details: &CardDetails) -> Result<(), ValidationError> {
    let number: String = details.card_number.chars().filter(|c| *c != ' ').collect();
    if number.chars().count() != CARD_NUMBER_LEN {
        return Err(ValidationError::InvalidCardNumber);
    }

    // MM/YY or MM/YYYY
    let expiry_len = details.expiry.chars().count();
    if expiry_len != 5 && expiry_len != 7 {
        return Err(ValidationError::InvalidExpiry);
    }

    if details.cvv.chars().count() < MIN_CVV_LEN {
        return Err(ValidationError::InvalidCvv);
    }

    Ok(())
}
