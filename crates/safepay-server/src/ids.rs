//! Identifier generation for invoices and payments.

use uuid::Uuid;

pub const INVOICE_PREFIX: &str = "inv_";
pub const PAYMENT_PREFIX: &str = "pay_";

/// Source of new record identifiers, independent of storage.
pub trait IdGenerator: Send + Sync {
    fn invoice_id(&self) -> String;
    fn payment_id(&self) -> String;
}

/// Prefixed v4 UUIDs in simple (32 hex chars) form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn invoice_id(&self) -> String {
        format!("{}{}", INVOICE_PREFIX, Uuid::new_v4().simple())
    }

    fn payment_id(&self) -> String {
        format!("{}{}", PAYMENT_PREFIX, Uuid::new_v4().simple())
    }
}
