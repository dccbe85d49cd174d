//! Payroll engine HTTP server.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load the catalog, roster and settings from the config directory
//! 3. Backfill recent payslips up to today's date
//! 4. Serve the HTTP API

use std::net::SocketAddr;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::engine::PayrollEngine;
use payroll_engine::persistence::FileSink;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("payroll-engine starting");

    let config_dir =
        std::env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    let settings = config.settings().clone();

    let today = chrono::Local::now().date_naive();
    let state = config.build_state(today)?;
    let sink = FileSink::new(&settings.output_dir);
    let mut engine = PayrollEngine::new(state, Box::new(sink));
    let backfilled = engine.bootstrap(today)?;
    info!(
        %today,
        cycles = backfilled.len(),
        employees = engine.state().employees().len(),
        output_dir = %settings.output_dir,
        "Payroll ready"
    );

    let app = create_router(AppState::new(engine).with_company_name(&settings.company_name));

    let addr: SocketAddr = std::env::var("PAYROLL_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Payroll API listening");

    axum::serve(listener, app).await?;
    Ok(())
}
