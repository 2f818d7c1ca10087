//! Safepay Server - invoice and payment API
//!
//! This crate provides the invoice ledger, the payment processor and the
//! REST API that exposes them over a SQLite store.

pub mod config;
pub mod db;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod models;
pub mod processor;
pub mod routes;
pub mod settlement;
pub mod store;

pub use error::{AppError, ValidationError};
pub use routes::{create_router, AppState};
