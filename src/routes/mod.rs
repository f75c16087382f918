// ABOUTME: Route module organization for the NutriVision HTTP endpoints
// ABOUTME: Shared application state and the router assembling health, profile, and plan routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the NutriVision server
//!
//! The server holds a single session: one profile draft and one pipeline.

use std::sync::Arc;

use axum::Router;
use nutrivision_core::models::ProfileDraft;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::orchestrator::Orchestrator;

/// Health check and readiness routes
pub mod health;
/// Plan submission, status, reset, and download routes
pub mod plan;
/// Profile draft editing routes
pub mod profile;

pub use health::HealthRoutes;
pub use plan::PlanRoutes;
pub use profile::ProfileRoutes;

/// State shared by all handlers
pub struct AppState {
    /// Profile being edited
    pub profile: RwLock<ProfileDraft>,
    /// Generation pipeline
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// State with a default draft
    #[must_use]
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            profile: RwLock::new(ProfileDraft::new()),
            orchestrator,
        }
    }
}

/// Build the complete router with tracing and CORS layers
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&state)))
        .merge(ProfileRoutes::routes(Arc::clone(&state)))
        .merge(PlanRoutes::routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
