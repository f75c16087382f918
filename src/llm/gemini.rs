// ABOUTME: Google Gemini REST client implementing the generation service contract
// ABOUTME: Posts generateContent calls and maps provider failures onto application error codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Client
//!
//! Implementation of [`GenerationService`] for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio: <https://aistudio.google.com/app/apikey>
//!
//! ## Models used by the pipeline
//!
//! - `gemini-3-flash-preview` (default plan model): structured JSON output
//! - `gemini-2.5-flash-image` (default image model): inline PNG output

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Instant;

use async_trait::async_trait;
use nutrivision_core::errors::{AppError, AppResult, ErrorCode};
use reqwest::Client;
use tracing::{debug, error, instrument};

use super::{GenerateContentRequest, GenerateContentResponse, GenerationService};
use crate::config::GenerationConfig as ProviderConfig;

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Provider name used in error messages
const SERVICE_NAME: &str = "Gemini";

/// Google Gemini REST client
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    /// Create a client for the given API key and base URL
    #[must_use]
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    /// Create a client from loaded provider settings
    #[must_use]
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(config.api_key.clone(), config.api_base_url.clone())
    }

    /// Build the API URL for a model and method
    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    /// Verify the API key by listing models
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceUnavailable` when the API cannot be reached.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> AppResult<bool> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| {
                AppError::external_unavailable(SERVICE_NAME, format!("Health check failed: {e}"))
            })?;

        Ok(response.status().is_success())
    }

    /// Map API error status to appropriate error type
    ///
    /// For rate limit (429) and quota errors, returns a user-friendly error
    /// that exposes the retry delay reported by Gemini.
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GenerateContentResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                Self::extract_quota_message(&message),
            ),
            401 | 403 => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("{SERVICE_NAME} rejected the API key ({status}): {message}"),
            ),
            _ => AppError::external_service(
                SERVICE_NAME,
                format!("API error ({status}): {message}"),
            ),
        }
    }

    /// Extract a user-friendly quota message from a Gemini error
    ///
    /// Example input: "... Please retry in 6.406453963s."
    fn extract_quota_message(message: &str) -> String {
        let seconds = message
            .split_once("Please retry in ")
            .and_then(|(_, rest)| rest.split_once('s'))
            .and_then(|(value, _)| value.parse::<f64>().ok())
            .filter(|s| s.is_finite() && *s >= 0.0);

        if let Some(seconds) = seconds {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let seconds_int = seconds.ceil() as u64;
            return format!("AI service quota exceeded. Please try again in {seconds_int} seconds.");
        }
        "AI service quota exceeded. Please wait a moment and try again.".to_owned()
    }
}

#[async_trait]
impl GenerationService for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse> {
        let url = self.build_url(&request.model, "generateContent");
        let started = Instant::now();

        debug!("Sending generateContent request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Gemini request failed to send");
                AppError::external_unavailable(SERVICE_NAME, format!("HTTP request failed: {e}"))
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AppError::external_unavailable(SERVICE_NAME, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response");
                AppError::external_service(SERVICE_NAME, format!("Failed to parse response: {e}"))
            })?;

        if let Some(api_error) = &gemini_response.error {
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!("API error: {}", api_error.message),
            ));
        }

        debug!(
            elapsed_ms = started.elapsed().as_millis(),
            "Received Gemini response"
        );
        Ok(gemini_response)
    }
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            // Omit `client` field as HTTP clients are not useful to debug
            .finish_non_exhaustive()
    }
}
