//! employee-roster HTTP server binary.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `HOST` — Bind address (default: 0.0.0.0)
//! - `ROSTER_CONFIG` — Optional YAML config file
//! - `ROSTER_DUPLICATE_POLICY` — "name" (default) or "name_and_occupation"
//! - `ROSTER_SEED` — Load the startup roster (default: true)
//! - `ROSTER_CHANGE_DELAY_MS` — Delay before summarizing a change batch
//! - `RUST_LOG` — Tracing filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use anyhow::Context;
use employee_roster::server::{app_router, AppState};
use employee_roster::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,employee_roster=debug".into()),
        )
        .init();

    let config = ServiceConfig::from_env().context("failed to load service configuration")?;
    let bind_addr = config.bind_addr();

    let state = AppState::new(config);
    {
        let store = state
            .store
            .read()
            .map_err(|_| anyhow::anyhow!("employee store lock poisoned"))?;
        tracing::info!(
            employees = store.len(),
            policy = ?store.policy(),
            "employee store ready"
        );
    }

    let app = app_router(state);

    tracing::info!("employee-roster server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health         — liveness probe");
    tracing::info!("  GET    /employees      — list employees");
    tracing::info!("  GET    /employees/:n   — employee at position n");
    tracing::info!("  POST   /employees      — add an employee");
    tracing::info!("  PUT    /employees/:n   — insert before position n");
    tracing::info!("  DELETE /employees/:n   — remove an employee");
    tracing::info!("  POST   /changes        — summarize a change batch");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    tracing::info!("employee-roster server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
