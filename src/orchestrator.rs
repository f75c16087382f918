// ABOUTME: Pipeline orchestrator sequencing plan generation then infographic generation
// ABOUTME: Owns the shared pipeline state machine and discards results from superseded runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Generation Pipeline
//!
//! A run moves through `Loading` (plan call in flight) and `AwaitingImage`
//! (image call in flight) before landing in `Success` or `Failed`. The plan is
//! only visible once the image is ready: snapshots taken while the image is
//! pending report the phase but not the plan.
//!
//! Every run carries the generation number current when it started. [`Orchestrator::reset`]
//! bumps the generation, so a run that completes after a reset finds a
//! mismatch at commit time and its result is dropped.

use std::sync::Arc;

use nutrivision_core::constants::messages;
use nutrivision_core::errors::{AppError, AppResult, ErrorCode};
use nutrivision_core::models::{NutritionalPlan, PlanImage, UserProfile};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::GenerationConfig;
use crate::llm::GenerationService;
use crate::planner::{ImageRequestClient, PlanRequestClient};

/// State of the generation pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PipelineState {
    /// Nothing requested yet, or reset
    #[default]
    Idle,
    /// Plan call in flight
    Loading,
    /// Plan received, image call in flight
    AwaitingImage(NutritionalPlan),
    /// Plan and image both available
    Success {
        /// Generated plan
        plan: NutritionalPlan,
        /// Infographic for the plan
        image: PlanImage,
    },
    /// The run failed with a user-facing message
    Failed(String),
}

impl PipelineState {
    /// Whether a run is in flight
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Loading | Self::AwaitingImage(_))
    }

    /// Externally visible phase
    #[must_use]
    pub const fn phase(&self) -> PipelinePhase {
        match self {
            Self::Idle => PipelinePhase::Idle,
            Self::Loading => PipelinePhase::Loading,
            Self::AwaitingImage(_) => PipelinePhase::GeneratingImage,
            Self::Success { .. } => PipelinePhase::Success,
            Self::Failed(_) => PipelinePhase::Error,
        }
    }
}

/// Phase reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    /// No run
    Idle,
    /// Generating the plan
    Loading,
    /// Generating the infographic
    GeneratingImage,
    /// Plan and infographic ready
    Success,
    /// Run failed
    Error,
}

/// Serializable view of the pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineSnapshot {
    /// Current phase
    pub phase: PipelinePhase,
    /// Identifier of the current or last run, cleared on reset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<Uuid>,
    /// Progress message while a run is in flight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_message: Option<String>,
    /// Plan, present only on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<NutritionalPlan>,
    /// Infographic as a data URI, present only on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data_uri: Option<String>,
    /// Failure message, present only on error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Result committed as `Success`
    Completed,
    /// Failure committed as `Failed`
    Failed,
    /// A reset happened first; nothing was committed
    Superseded,
}

/// Claim on a started run, returned by [`Orchestrator::begin`]
#[derive(Debug)]
pub struct RunTicket {
    generation: u64,
    run_id: Uuid,
    profile: UserProfile,
}

impl RunTicket {
    /// Identifier of the run
    #[must_use]
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }
}

#[derive(Debug, Default)]
struct PipelineInner {
    state: PipelineState,
    generation: u64,
    run_id: Option<Uuid>,
}

/// Sequences the plan and image calls and owns the pipeline state
pub struct Orchestrator {
    plan_client: PlanRequestClient,
    image_client: ImageRequestClient,
    inner: RwLock<PipelineInner>,
}

impl Orchestrator {
    /// Create an idle orchestrator
    #[must_use]
    pub fn new(plan_client: PlanRequestClient, image_client: ImageRequestClient) -> Self {
        Self {
            plan_client,
            image_client,
            inner: RwLock::new(PipelineInner::default()),
        }
    }

    /// Create an orchestrator whose clients share one generation service
    #[must_use]
    pub fn from_config(service: Arc<dyn GenerationService>, config: &GenerationConfig) -> Self {
        Self::new(
            PlanRequestClient::new(Arc::clone(&service), config.plan_model.clone()),
            ImageRequestClient::new(service, config.image_model.clone()),
        )
    }

    /// Current state
    pub async fn state(&self) -> PipelineState {
        self.inner.read().await.state.clone()
    }

    /// Serializable view of the current state
    pub async fn snapshot(&self) -> PipelineSnapshot {
        let inner = self.inner.read().await;
        let mut snapshot = PipelineSnapshot {
            phase: inner.state.phase(),
            run_id: inner.run_id,
            stage_message: None,
            plan: None,
            image_data_uri: None,
            error: None,
        };
        match &inner.state {
            PipelineState::Idle => {}
            PipelineState::Loading => {
                snapshot.stage_message = Some(messages::STAGE_PLAN.to_owned());
            }
            PipelineState::AwaitingImage(_) => {
                snapshot.stage_message = Some(messages::STAGE_IMAGE.to_owned());
            }
            PipelineState::Success { plan, image } => {
                snapshot.plan = Some(plan.clone());
                snapshot.image_data_uri = Some(image.data_uri());
            }
            PipelineState::Failed(message) => snapshot.error = Some(message.clone()),
        }
        snapshot
    }

    /// The infographic of a successful run
    pub async fn image(&self) -> Option<PlanImage> {
        match &self.inner.read().await.state {
            PipelineState::Success { image, .. } => Some(image.clone()),
            _ => None,
        }
    }

    /// Start a run: move to `Loading`, clearing any previous result or error
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` while another run is in flight.
    pub async fn begin(&self, profile: UserProfile) -> AppResult<RunTicket> {
        let mut inner = self.inner.write().await;
        if inner.state.is_busy() {
            return Err(AppError::locked(
                "A plan is already being generated; wait for it to finish or reset",
            ));
        }
        let run_id = Uuid::new_v4();
        inner.state = PipelineState::Loading;
        inner.run_id = Some(run_id);
        info!(%run_id, generation = inner.generation, "Plan generation started");
        Ok(RunTicket {
            generation: inner.generation,
            run_id,
            profile,
        })
    }

    /// Run both generation calls for a started run and commit the result
    #[instrument(
        skip(self, ticket),
        fields(run_id = %ticket.run_id, generation = ticket.generation)
    )]
    pub async fn execute(&self, ticket: RunTicket) -> RunOutcome {
        let plan = match self.plan_client.generate(&ticket.profile).await {
            Ok(plan) => plan,
            Err(e) => return self.fail(ticket.generation, &e).await,
        };

        if !self
            .commit(ticket.generation, PipelineState::AwaitingImage(plan.clone()))
            .await
        {
            return RunOutcome::Superseded;
        }

        let image = match self.image_client.generate(&plan).await {
            Ok(image) => image,
            Err(e) => return self.fail(ticket.generation, &e).await,
        };

        if self
            .commit(ticket.generation, PipelineState::Success { plan, image })
            .await
        {
            info!("Plan generation completed");
            RunOutcome::Completed
        } else {
            RunOutcome::Superseded
        }
    }

    /// Start a run and wait for it to finish
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` while another run is in flight.
    pub async fn generate(&self, profile: UserProfile) -> AppResult<PipelineSnapshot> {
        let ticket = self.begin(profile).await?;
        self.execute(ticket).await;
        Ok(self.snapshot().await)
    }

    /// Start a run in the background and return the `Loading` snapshot
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` while another run is in flight.
    pub async fn submit(self: &Arc<Self>, profile: UserProfile) -> AppResult<PipelineSnapshot> {
        let ticket = self.begin(profile).await?;
        let snapshot = self.snapshot().await;
        let orchestrator = Arc::clone(self);
        tokio::spawn(async move {
            orchestrator.execute(ticket).await;
        });
        Ok(snapshot)
    }

    /// Return to `Idle` from any state
    ///
    /// A run still in flight keeps going but its result is discarded.
    pub async fn reset(&self) {
        let mut inner = self.inner.write().await;
        inner.generation = inner.generation.wrapping_add(1);
        inner.state = PipelineState::Idle;
        inner.run_id = None;
        debug!(generation = inner.generation, "Pipeline reset");
    }

    /// Replace the state if the run's generation is still current
    async fn commit(&self, generation: u64, state: PipelineState) -> bool {
        let mut inner = self.inner.write().await;
        if inner.generation != generation {
            debug!(
                run_generation = generation,
                current_generation = inner.generation,
                "Discarding result of superseded run"
            );
            return false;
        }
        inner.state = state;
        true
    }

    async fn fail(&self, generation: u64, error: &AppError) -> RunOutcome {
        warn!(
            code = ?error.code,
            category = failure_category(error),
            error = %error,
            "Plan generation failed"
        );
        if self
            .commit(generation, PipelineState::Failed(failure_message(error)))
            .await
        {
            RunOutcome::Failed
        } else {
            RunOutcome::Superseded
        }
    }
}

/// Log category of a run failure
#[must_use]
pub const fn failure_category(error: &AppError) -> &'static str {
    if error.code.is_network() {
        "network"
    } else if error.code.is_plan_generation() {
        "plan"
    } else {
        match error.code {
            ErrorCode::ImageGenerationFailed => "image",
            _ => "internal",
        }
    }
}

/// User-facing message for a failed run
#[must_use]
pub fn failure_message(error: &AppError) -> String {
    if error.message.trim().is_empty() {
        messages::UNEXPECTED_ERROR.to_owned()
    } else {
        error.message.clone()
    }
}
