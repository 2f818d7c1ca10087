//! Server configuration from command-line flags and environment.

use std::net::SocketAddr;

use clap::Parser;

use crate::settlement::DEFAULT_APPROVAL_RATE;

/// Safepay - invoice and payment API server
#[derive(Debug, Clone, Parser)]
#[command(name = "safepay")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// SQLite database URL. The file is created if missing.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://safepay.db")]
    pub database_url: String,

    /// Address to listen on
    #[arg(long = "bind", env = "SAFEPAY_BIND", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// Maximum pooled database connections
    #[arg(long, env = "SAFEPAY_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// Probability that a simulated settlement is approved
    #[arg(long, env = "SAFEPAY_APPROVAL_RATE", default_value_t = DEFAULT_APPROVAL_RATE, value_parser = parse_rate)]
    pub approval_rate: f64,
}

fn parse_rate(value: &str) -> Result<f64, String> {
    let rate: f64 = value
        .parse()
        .map_err(|e| format!("not a number: {}", e))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(format!("{} is outside [0, 1]", rate));
    }
    Ok(rate)
}
