#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use safepay_server::db;
use safepay_server::ids::{IdGenerator, UuidIdGenerator};
use safepay_server::models::{CardDetails, Invoice, NewInvoice, Payment, PaymentAttempt};
use safepay_server::settlement::{
    FixedSettlement, SettlementGateway, SettlementOutcome, SettlementRequest,
};
use safepay_server::store::{SettlementWrite, SqliteStore, Store};
use safepay_server::AppState;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Creates a migrated in-memory database.
///
/// A single connection that never expires keeps the in-memory database alive
/// for the whole test.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn state_with(pool: &SqlitePool, gateway: Arc<dyn SettlementGateway>) -> AppState {
    AppState::new(
        Arc::new(SqliteStore::new(pool.clone())),
        Arc::new(UuidIdGenerator),
        gateway,
    )
}

pub fn approving_state(pool: &SqlitePool) -> AppState {
    state_with(pool, Arc::new(FixedSettlement::approve()))
}

pub fn new_invoice(amount: i64, currency: &str) -> NewInvoice {
    NewInvoice {
        merchant_id: "merchant_1".to_string(),
        customer_id: "customer_1".to_string(),
        amount,
        currency: currency.to_string(),
        description: Some("Test invoice".to_string()),
    }
}

pub fn card_attempt(invoice_id: &str) -> PaymentAttempt {
    PaymentAttempt {
        invoice_id: invoice_id.to_string(),
        method: "card".to_string(),
        details: CardDetails {
            card_number: "4111 1111 1111 1111".to_string(),
            expiry: "12/25".to_string(),
            cvv: "123".to_string(),
        },
    }
}

pub async fn count_payments(pool: &SqlitePool, invoice_id: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE invoice_id = ?")
        .bind(invoice_id)
        .fetch_one(pool)
        .await
        .expect("Failed to count payments")
}

/// Gateway that records how many times it was asked to settle.
pub struct CountingSettlement {
    outcome: SettlementOutcome,
    calls: AtomicUsize,
}

impl CountingSettlement {
    pub fn new(outcome: SettlementOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettlementGateway for CountingSettlement {
    async fn settle(&self, _request: &SettlementRequest) -> SettlementOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome
    }
}

/// Store whose every operation fails as if the database were unreachable.
pub struct UnavailableStore;

#[async_trait]
impl Store for UnavailableStore {
    async fn insert_invoice(&self, _invoice: &Invoice) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn get_invoice(&self, _invoice_id: &str) -> Result<Option<Invoice>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn get_latest_payment(&self, _invoice_id: &str) -> Result<Option<Payment>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn record_settlement(&self, _payment: &Payment) -> Result<SettlementWrite, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

/// Creates a migrated file-backed database with several connections, so
/// settlements really run in separate SQLite transactions.
pub async fn create_file_pool(dir: &tempfile::TempDir, max_connections: u32) -> SqlitePool {
    let url = format!("sqlite://{}", dir.path().join("safepay.db").display());
    let pool = db::create_pool(&url, max_connections)
        .await
        .expect("Failed to create file database pool");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Hands out the same payment id every time.
pub struct FixedPaymentIds {
    pub payment_id: String,
}

impl IdGenerator for FixedPaymentIds {
    fn invoice_id(&self) -> String {
        UuidIdGenerator.invoice_id()
    }

    fn payment_id(&self) -> String {
        self.payment_id.clone()
    }
}
