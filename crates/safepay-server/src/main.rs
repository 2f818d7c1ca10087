use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use safepay_server::config::Config;
use safepay_server::ids::UuidIdGenerator;
use safepay_server::settlement::RandomSettlement;
use safepay_server::store::SqliteStore;
use safepay_server::{create_router, db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("safepay_server=info,tower_http=info")),
        )
        .init();

    let config = Config::parse();
    tracing::info!("Safepay server starting...");

    let pool = db::create_pool(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let gateway = RandomSettlement::new(config.approval_rate);
    let approval_rate = gateway.approval_rate();
    let state = AppState::new(
        Arc::new(SqliteStore::new(pool)),
        Arc::new(UuidIdGenerator),
        Arc::new(gateway),
    );
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, approval_rate, "Server listening");

    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
