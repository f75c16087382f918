// ABOUTME: Generation service abstraction for pluggable generative model backends
// ABOUTME: Defines the generateContent request/response wire types and the async service contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Generation Service Interface
//!
//! The plan pipeline talks to a generative model through [`GenerationService`].
//! Request and response types mirror the Gemini `generateContent` wire format,
//! so the production [`GeminiClient`] serializes them as-is while tests can
//! substitute a scripted implementation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nutrivision_server::llm::{GenerateContentRequest, GenerationService};
//!
//! async fn example(service: &dyn GenerationService) {
//!     let request = GenerateContentRequest::text("gemini-3-flash-preview", "Hello");
//!     let response = service.generate_content(&request).await;
//! }
//! ```

mod gemini;
pub mod schema;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use nutrivision_core::errors::AppResult;
use serde::{Deserialize, Serialize};

// ============================================================================
// Request Types
// ============================================================================

/// A single `generateContent` call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Model identifier; part of the URL, not the body
    #[serde(skip)]
    pub model: String,
    /// Conversation contents (a single user turn for this pipeline)
    pub contents: Vec<Content>,
    /// Output configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Build a request with one text prompt and no output configuration
    #[must_use]
    pub fn text(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            contents: vec![Content::user_text(prompt)],
            generation_config: None,
        }
    }

    /// Attach an output configuration
    #[must_use]
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }

    /// Concatenated text of every prompt part
    #[must_use]
    pub fn prompt_text(&self) -> String {
        self.contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect()
    }
}

/// Content block made of ordered parts
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    /// Author role (`user` or `model`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// User turn holding a single text part
    #[must_use]
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_owned()),
            parts: vec![Part::text(text)],
        }
    }
}

/// One part of a content block: text or inline binary data
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// Text part
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// Inline data part
    #[must_use]
    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

/// Base64-encoded binary payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type reported by the model
    #[serde(default)]
    pub mime_type: String,
    /// Base64 data
    #[serde(default)]
    pub data: String,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Requested output MIME type (for example `application/json`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// Schema the output must satisfy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    /// Image output options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

/// Image output options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    /// Aspect ratio such as `1:1`
    pub aspect_ratio: String,
}

// ============================================================================
// Response Types
// ============================================================================

/// Response of a `generateContent` call
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate outputs; the pipeline only reads the first one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    /// Error object some gateways return with a 200 status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// A single candidate output
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Why generation stopped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Error object embedded in an API response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    /// Provider message
    pub message: String,
}

impl GenerateContentResponse {
    /// Response with one candidate holding the given parts
    #[must_use]
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            candidates: Some(vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_owned()),
                    parts,
                }),
                finish_reason: Some("STOP".to_owned()),
            }]),
            error: None,
        }
    }

    /// The first candidate, if any
    #[must_use]
    pub fn first_candidate(&self) -> Option<&Candidate> {
        self.candidates.as_ref().and_then(|c| c.first())
    }

    /// Parts of the first candidate; empty when there is no candidate or content
    #[must_use]
    pub fn first_parts(&self) -> &[Part] {
        self.first_candidate()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text of the first candidate
    ///
    /// Returns `None` when there are no text parts or all of them are empty.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

// ============================================================================
// Service Trait
// ============================================================================

/// Backend able to run a `generateContent` call
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Short provider name used in logs and error messages
    fn name(&self) -> &'static str;

    /// Run one generation call
    ///
    /// # Errors
    ///
    /// Returns a network-category `AppError` when the provider is unreachable,
    /// answers with a failure status, or returns an unreadable body.
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse>;
}
