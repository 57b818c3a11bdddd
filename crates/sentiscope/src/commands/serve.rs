//! Serve command: run the HTTP service.

use anyhow::Context;
use clap::Args;
use sentiscope_core::Config;
use tracing::{info, instrument};

use crate::server::{self, AppState};

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides config).
    #[arg(long)]
    pub bind: Option<String>,
}

/// Start the HTTP service and run until interrupted.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let addr = args.bind.unwrap_or_else(|| config.bind_addr.clone());
    let state = AppState::from_config(&config).await;
    let router = server::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "HTTP service listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP service failed")?;

    info!("HTTP service stopped");
    Ok(())
}

async fn shutdown_signal() {
    // Errors here mean the signal handler could not be installed; in that
    // case run until the process is killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
