// ABOUTME: Route handlers for submitting, polling, resetting, and downloading a generated plan
// ABOUTME: Thin wrappers delegating to the pipeline orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan routes
//!
//! `POST /api/plan` snapshots the current profile draft and starts a run in
//! the background. Clients poll `GET /api/plan` until the phase is `success`
//! or `error`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use nutrivision_core::constants::mime;
use nutrivision_core::errors::AppError;

use super::AppState;
use crate::orchestrator::PipelineSnapshot;

/// Plan routes handler
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create all plan routes
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/api/plan", post(Self::handle_submit).get(Self::handle_status))
            .route("/api/plan/reset", post(Self::handle_reset))
            .route("/api/plan/image", get(Self::handle_image))
            .with_state(state)
    }

    /// Handle POST /api/plan - Start generation for the current draft
    async fn handle_submit(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
        let profile = state.profile.read().await.snapshot()?;
        let snapshot = state.orchestrator.submit(profile).await?;
        Ok((StatusCode::ACCEPTED, Json(snapshot)).into_response())
    }

    /// Handle GET /api/plan - Current pipeline snapshot
    async fn handle_status(State(state): State<Arc<AppState>>) -> Json<PipelineSnapshot> {
        Json(state.orchestrator.snapshot().await)
    }

    /// Handle POST /api/plan/reset - Back to idle
    async fn handle_reset(State(state): State<Arc<AppState>>) -> Json<PipelineSnapshot> {
        state.orchestrator.reset().await;
        Json(state.orchestrator.snapshot().await)
    }

    /// Handle GET /api/plan/image - Download the infographic
    async fn handle_image(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
        let image = state
            .orchestrator
            .image()
            .await
            .ok_or_else(|| AppError::not_found("Plan infographic"))?;

        Ok((
            [
                (header::CONTENT_TYPE, image.mime_type().to_owned()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", mime::INFOGRAPHIC_FILE_NAME),
                ),
            ],
            image.bytes().to_vec(),
        )
            .into_response())
    }
}
