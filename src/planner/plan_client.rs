// ABOUTME: Plan request client turning a user profile into a validated nutritional plan
// ABOUTME: Calls the text model with a strict JSON schema and parses the structured output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use nutrivision_core::constants::mime;
use nutrivision_core::errors::{AppError, AppResult};
use nutrivision_core::models::{NutritionalPlan, UserProfile};
use tracing::{debug, error, info, instrument};

use super::prompts::build_plan_prompt;
use crate::llm::schema::nutritional_plan_schema;
use crate::llm::{GenerateContentRequest, GenerationConfig, GenerationService};

/// Client for the structured plan generation call
#[derive(Clone)]
pub struct PlanRequestClient {
    service: Arc<dyn GenerationService>,
    model: String,
}

impl PlanRequestClient {
    /// Create a client that calls `model` through `service`
    #[must_use]
    pub fn new(service: Arc<dyn GenerationService>, model: impl Into<String>) -> Self {
        Self {
            service,
            model: model.into(),
        }
    }

    /// Build the full request for a profile
    #[must_use]
    pub fn build_request(&self, profile: &UserProfile) -> GenerateContentRequest {
        GenerateContentRequest::text(&self.model, build_plan_prompt(profile)).with_config(
            GenerationConfig {
                response_mime_type: Some(mime::APPLICATION_JSON.to_owned()),
                response_schema: Some(nutritional_plan_schema()),
                image_config: None,
            },
        )
    }

    /// Generate a plan for the profile
    ///
    /// # Errors
    ///
    /// Propagates network errors from the service unchanged. Returns
    /// `PlanGenerationEmpty` when the model produced no text and
    /// `PlanFormatInvalid` when the text is not a valid plan.
    #[instrument(
        skip(self, profile),
        fields(service = self.service.name(), model = %self.model, stage = "plan")
    )]
    pub async fn generate(&self, profile: &UserProfile) -> AppResult<NutritionalPlan> {
        let request = self.build_request(profile);
        let started = Instant::now();

        let response = self.service.generate_content(&request).await?;
        let text = response.text().ok_or_else(AppError::plan_empty)?;
        debug!(chars = text.len(), "Plan text received");

        let plan = parse_plan(&text)?;
        info!(
            elapsed_ms = started.elapsed().as_millis(),
            total_calories = plan.daily_plan.total_calories,
            "Nutritional plan generated"
        );
        Ok(plan)
    }
}

/// Parse model output into a plan, rejecting missing fields and negative values
///
/// # Errors
///
/// Returns `PlanFormatInvalid` carrying the raw text in its details.
pub fn parse_plan(text: &str) -> AppResult<NutritionalPlan> {
    let plan: NutritionalPlan = serde_json::from_str(text).map_err(|e| {
        error!(error = %e, raw_response = %text, "Plan response is not valid JSON for the schema");
        AppError::plan_format(e.to_string(), text)
    })?;

    if let Some(violation) = plan.find_violation() {
        error!(%violation, raw_response = %text, "Plan response has invalid values");
        return Err(AppError::plan_format(violation, text));
    }
    Ok(plan)
}
