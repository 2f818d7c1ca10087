//! Database models for Safepay.

pub mod invoice;
pub mod payment;

pub use invoice::{Invoice, InvoiceStatus, NewInvoice};
pub use payment::{CardDetails, Payment, PaymentAttempt, PaymentStatus};
