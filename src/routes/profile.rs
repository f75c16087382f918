// ABOUTME: Route handlers for editing the profile draft before plan submission
// ABOUTME: Field-level updates plus add/remove of dietary restriction tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use nutrivision_core::errors::AppError;
use nutrivision_core::models::{ProfileDraft, ProfileUpdate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AppState;

/// Body of `POST /api/profile/restrictions`
#[derive(Debug, Serialize, Deserialize)]
pub struct AddRestrictionRequest {
    /// Tag to add
    pub tag: String,
}

/// Profile routes handler
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route(
                "/api/profile",
                get(Self::handle_get).patch(Self::handle_update),
            )
            .route("/api/profile/restrictions", post(Self::handle_add_restriction))
            .route(
                "/api/profile/restrictions/:tag",
                delete(Self::handle_remove_restriction),
            )
            .with_state(state)
    }

    /// Handle GET /api/profile - Current draft
    async fn handle_get(State(state): State<Arc<AppState>>) -> Json<ProfileDraft> {
        Json(state.profile.read().await.clone())
    }

    /// Handle PATCH /api/profile - Apply field-level edits
    async fn handle_update(
        State(state): State<Arc<AppState>>,
        Json(update): Json<ProfileUpdate>,
    ) -> Json<ProfileDraft> {
        let mut draft = state.profile.write().await;
        draft.apply(update);
        Json(draft.clone())
    }

    /// Handle POST /api/profile/restrictions - Add a tag
    async fn handle_add_restriction(
        State(state): State<Arc<AppState>>,
        Json(body): Json<AddRestrictionRequest>,
    ) -> Result<Response, AppError> {
        let mut draft = state.profile.write().await;
        draft.add_restriction(&body.tag)?;
        debug!(tag = %body.tag.trim(), "Dietary restriction added");
        Ok((StatusCode::CREATED, Json(draft.clone())).into_response())
    }

    /// Handle DELETE /api/profile/restrictions/:tag - Remove a tag
    async fn handle_remove_restriction(
        State(state): State<Arc<AppState>>,
        Path(tag): Path<String>,
    ) -> Result<Json<ProfileDraft>, AppError> {
        let mut draft = state.profile.write().await;
        if !draft.remove_restriction(&tag) {
            return Err(AppError::not_found(format!("Dietary restriction '{tag}'")));
        }
        Ok(Json(draft.clone()))
    }
}
