// ABOUTME: HTTP server binary for the agent caddie API
// ABOUTME: Loads configuration, wires collaborators, and serves the axum router until ctrl-c
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Agent Caddie Server Binary
//!
//! Serves the caddie HTTP API. Configuration comes from the environment (and a
//! `.env` file when present); `--host` and `--http-port` override it.

use agent_caddie::{
    config::CaddieConfig,
    errors::{AppError, AppResult},
    logging,
    routes::app_router,
    services::CaddieService,
};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "caddie-server")]
#[command(about = "Agent Caddie - golf club recommendations over HTTP")]
struct Args {
    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = CaddieConfig::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    info!("{}", config.summary());

    let service = Arc::new(CaddieService::from_config(&config)?);
    info!(backend = service.gateway().backend(), "Shot store ready");

    let app = app_router(service, &config.cors_origins);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {address}: {e}")))?;
    info!("Agent caddie listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Agent caddie stopped");
    Ok(())
}
