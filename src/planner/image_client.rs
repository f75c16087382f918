// ABOUTME: Image request client turning a nutritional plan into an infographic
// ABOUTME: Calls the image model and extracts the first inline image payload from the response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use nutrivision_core::constants::models::INFOGRAPHIC_ASPECT_RATIO;
use nutrivision_core::errors::{AppError, AppResult};
use nutrivision_core::models::{NutritionalPlan, PlanImage};
use tracing::{info, instrument, warn};

use super::prompts::build_image_prompt;
use crate::llm::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, GenerationService,
    ImageConfig,
};

/// Message used when the response holds no candidate or no parts
pub const NO_IMAGE_MESSAGE: &str = "No image generated by the model";
/// Message used when no part carries inline image data
pub const NO_INLINE_DATA_MESSAGE: &str = "Failed to extract image data from AI response";

/// Client for the infographic generation call
#[derive(Clone)]
pub struct ImageRequestClient {
    service: Arc<dyn GenerationService>,
    model: String,
}

impl ImageRequestClient {
    /// Create a client that calls `model` through `service`
    #[must_use]
    pub fn new(service: Arc<dyn GenerationService>, model: impl Into<String>) -> Self {
        Self {
            service,
            model: model.into(),
        }
    }

    /// Build the full request for a plan
    #[must_use]
    pub fn build_request(&self, plan: &NutritionalPlan) -> GenerateContentRequest {
        GenerateContentRequest::text(&self.model, build_image_prompt(plan)).with_config(
            GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: INFOGRAPHIC_ASPECT_RATIO.to_owned(),
                }),
                ..GenerationConfig::default()
            },
        )
    }

    /// Generate an infographic for the plan
    ///
    /// # Errors
    ///
    /// Propagates network errors from the service unchanged and returns
    /// `ImageGenerationFailed` when the response carries no usable image.
    #[instrument(
        skip(self, plan),
        fields(service = self.service.name(), model = %self.model, stage = "image")
    )]
    pub async fn generate(&self, plan: &NutritionalPlan) -> AppResult<PlanImage> {
        let request = self.build_request(plan);
        let started = Instant::now();

        let response = self.service.generate_content(&request).await?;
        let image = extract_image(&response)?;
        info!(
            elapsed_ms = started.elapsed().as_millis(),
            bytes = image.bytes().len(),
            "Infographic generated"
        );
        Ok(image)
    }
}

/// Return the first inline image found in the first candidate's parts
///
/// # Errors
///
/// Returns `ImageGenerationFailed` when there is no candidate, the candidate
/// has no parts, no part carries inline data, or the data is not valid base64.
pub fn extract_image(response: &GenerateContentResponse) -> AppResult<PlanImage> {
    let parts = response
        .first_candidate()
        .and_then(|c| c.content.as_ref())
        .map(|c| c.parts.as_slice())
        .filter(|parts| !parts.is_empty())
        .ok_or_else(|| AppError::image_generation(NO_IMAGE_MESSAGE))?;

    let inline = parts
        .iter()
        .filter_map(|p| p.inline_data.as_ref())
        .find(|d| !d.data.is_empty())
        .ok_or_else(|| {
            warn!(parts = parts.len(), "Image response has no inline data part");
            AppError::image_generation(NO_INLINE_DATA_MESSAGE)
        })?;

    PlanImage::from_base64(&inline.data)
}
