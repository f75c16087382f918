// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and readiness endpoints reporting the pipeline phase
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;

use super::AppState;
use crate::logging::SERVICE_NAME;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(state)
    }

    async fn handle_health() -> Json<serde_json::Value> {
        Json(json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn handle_ready(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
        let phase = state.orchestrator.state().await.phase();
        Json(json!({
            "status": "ready",
            "pipeline": phase,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}
