//! Invoice model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Possible states of an invoice. The only transition is `Unpaid -> Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Awaiting a successful payment
    Unpaid,
    /// Settled; never reverts
    Paid,
}

/// A billable request for a fixed amount, owned by a merchant and billed to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    /// Unique identifier (`inv_...`).
    pub id: String,
    /// Merchant that issued the invoice. Not checked for existence.
    pub merchant_id: String,
    /// Customer being billed. Not checked for existence.
    pub customer_id: String,
    /// Amount in minor currency units. Always positive.
    pub amount: i64,
    /// ISO-4217-shaped currency code.
    pub currency: String,
    /// Optional free text. Serialized as `null` when absent.
    pub description: Option<String>,
    /// Current invoice status.
    pub status: InvoiceStatus,
    /// When this invoice was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvoice {
    pub merchant_id: String,
    pub customer_id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Invoice {
    /// Builds an unpaid invoice from validated input.
    pub fn unpaid(id: String, new: NewInvoice, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            merchant_id: new.merchant_id,
            customer_id: new.customer_id,
            amount: new.amount,
            currency: new.currency,
            description: new.description,
            status: InvoiceStatus::Unpaid,
            created_at,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }
}
