// ABOUTME: Server binary exposing the NutriVision plan pipeline over HTTP
// ABOUTME: Loads configuration, initializes logging, and serves the axum router until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # NutriVision Server Binary
//!
//! Requires `GEMINI_API_KEY` (or `API_KEY`) in the environment.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use nutrivision_server::{
    config::ServerConfig,
    llm::GeminiClient,
    logging,
    orchestrator::Orchestrator,
    routes::{build_router, AppState},
};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "nutrivision-server")]
#[command(about = "NutriVision - personalized nutrition plans and infographics")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<std::net::IpAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env().context("Failed to load configuration")?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.http_host = host;
    }
    info!("{}", config.summary());

    let client = GeminiClient::from_config(&config.generation);
    match client.health_check().await {
        Ok(true) => info!("Gemini API reachable"),
        Ok(false) => warn!("Gemini API rejected the model listing; generation calls may fail"),
        Err(e) => warn!(error = %e, "Gemini API health check failed"),
    }

    let orchestrator = Arc::new(Orchestrator::from_config(
        Arc::new(client),
        &config.generation,
    ));
    let router = build_router(Arc::new(AppState::new(orchestrator)));

    let addr = SocketAddr::new(config.http_host, config.http_port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "NutriVision server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("NutriVision server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
