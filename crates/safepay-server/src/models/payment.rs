//! Payment model for settled invoices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Payment record status. Only successful settlements are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
}

/// A record of a successful settlement against an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Payment {
    /// Unique identifier (`pay_...`).
    pub id: String,
    /// Invoice this payment settles.
    pub invoice_id: String,
    /// Payment method as supplied by the caller (e.g. `card`).
    pub method: String,
    pub status: PaymentStatus,
    /// When settlement completed.
    pub paid_at: DateTime<Utc>,
}

/// Card fields supplied with a payment attempt. Validated, never persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardDetails {
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub cvv: String,
}

/// A payment attempt against an invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentAttempt {
    pub invoice_id: String,
    pub method: String,
    #[serde(default)]
    pub details: CardDetails,
}
