//! HTTP server exposing the payroll engine.

use std::net::SocketAddr;

use nomina_engine::api::{AppState, create_router};
use nomina_engine::config::FiscalParameters;
use nomina_engine::telemetry;
use tracing::info;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init(telemetry::DEFAULT_LOG_FILTER)?;

    let addr: SocketAddr = std::env::var("NOMINA_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let params = FiscalParameters::spain_2025();
    info!(fiscal_year = params.fiscal_year, "Loaded fiscal parameters");

    let app = create_router(AppState::new(params));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Payroll engine listening");
    axum::serve(listener, app).await?;

    Ok(())
}
