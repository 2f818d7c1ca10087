//! Persistence for invoices and payments.

use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{Invoice, InvoiceStatus, Payment};

/// Result of attempting to record a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementWrite {
    /// Invoice moved to `paid` and the payment row was inserted.
    Recorded,
    /// Invoice was already `paid`; nothing was written.
    AlreadyPaid,
    /// No such invoice; nothing was written.
    InvoiceMissing,
}

/// Storage collaborator used by the ledger and the payment processor.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_invoice(&self, invoice: &Invoice) -> Result<(), sqlx::Error>;

    async fn get_invoice(&self, invoice_id: &str) -> Result<Option<Invoice>, sqlx::Error>;

    /// Most recent payment for an invoice by `paid_at`.
    async fn get_latest_payment(&self, invoice_id: &str) -> Result<Option<Payment>, sqlx::Error>;

    /// Marks the invoice paid and inserts `payment` as one atomic unit.
    ///
    /// The status change only applies to an `unpaid` invoice, so of two
    /// concurrent settlements for the same invoice at most one is recorded.
    async fn record_settlement(&self, payment: &Payment) -> Result<SettlementWrite, sqlx::Error>;
}

/// SQLite-backed store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn insert_invoice(&self, invoice: &Invoice) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO invoices (id, merchant_id, customer_id, amount, currency, description, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.merchant_id)
        .bind(&invoice.customer_id)
        .bind(invoice.amount)
        .bind(&invoice.currency)
        .bind(&invoice.description)
        .bind(invoice.status)
        .bind(invoice.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_invoice(&self, invoice_id: &str) -> Result<Option<Invoice>, sqlx::Error> {
        sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, merchant_id, customer_id, amount, currency, description, status, created_at
            FROM invoices
            WHERE id = ?
            "#,
        )
        .bind(invoice_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_latest_payment(&self, invoice_id: &str) -> Result<Option<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, invoice_id, method, status, paid_at
            FROM payments
            WHERE invoice_id = ?
            ORDER BY paid_at DESC, rowid DESC
            LIMIT 1
            "#,
        )
        .bind(invoice_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn record_settlement(&self, payment: &Payment) -> Result<SettlementWrite, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        // The write lock is taken here, before any read, so the check and the
        // status change cannot interleave with another settlement.
        let updated = update_invoice_status(
            &mut tx,
            &payment.invoice_id,
            InvoiceStatus::Unpaid,
            InvoiceStatus::Paid,
        )
        .await?;

        if updated == 0 {
            let current: Option<InvoiceStatus> =
                sqlx::query_scalar("SELECT status FROM invoices WHERE id = ?")
                    .bind(&payment.invoice_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            tx.rollback().await?;

            return Ok(match current {
                Some(_) => SettlementWrite::AlreadyPaid,
                None => SettlementWrite::InvoiceMissing,
            });
        }

        insert_payment(&mut tx, payment).await?;
        tx.commit().await?;

        Ok(SettlementWrite::Recorded)
    }
}

/// Moves an invoice from `from` to `to`. Returns the number of rows changed.
pub async fn update_invoice_status(
    conn: &mut SqliteConnection,
    invoice_id: &str,
    from: InvoiceStatus,
    to: InvoiceStatus,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE invoices SET status = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(invoice_id)
        .bind(from)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

pub async fn insert_payment(conn: &mut SqliteConnection, payment: &Payment) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO payments (id, invoice_id, method, status, paid_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payment.id)
    .bind(&payment.invoice_id)
    .bind(&payment.method)
    .bind(payment.status)
    .bind(payment.paid_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
