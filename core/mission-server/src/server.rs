//! HTTP server lifecycle.

use crate::routes;
use crate::state::AppState;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Blocks until the server shuts down (Ctrl-C) or fails.
pub fn run(state: AppState, bind: &str, port: u16) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to start async runtime: {}", err))?;
    runtime.block_on(serve(state, bind, port))
}

async fn serve(state: AppState, bind: &str, port: u16) -> Result<(), String> {
    let listener = TcpListener::bind((bind, port))
        .await
        .map_err(|err| format!("Failed to bind {}:{}: {}", bind, port, err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("Failed to read listener address: {}", err))?;

    info!(%addr, "Mission Control listening");

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| format!("Server error: {}", err))?;

    info!("Mission Control stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(err) => {
            warn!(error = %err, "Failed to listen for Ctrl-C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
