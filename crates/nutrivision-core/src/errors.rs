// ABOUTME: Unified error handling with standard error codes and HTTP response formatting
// ABOUTME: Maps configuration, generation, image, and network failures onto one AppError type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the plan pipeline returns [`AppError`]. The
//! [`ErrorCode`] carries the failure category:
//!
//! | Category               | Codes                                                       |
//! |------------------------|-------------------------------------------------------------|
//! | Configuration          | `ConfigMissing`, `ConfigInvalid`                            |
//! | Plan generation        | `PlanGenerationEmpty`, `PlanFormatInvalid`                  |
//! | Image generation       | `ImageGenerationFailed`                                     |
//! | Network / provider     | `ExternalServiceUnavailable`, `ExternalServiceError`, ...   |
//! | Input validation       | `InvalidInput`, `ValueOutOfRange`                           |

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// The provided input is invalid
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// The provided value is outside the accepted range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Resource Management (4000-4999)
    /// The requested resource does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    /// A resource with the same identity already exists
    #[serde(rename = "RESOURCE_ALREADY_EXISTS")]
    ResourceAlreadyExists = 4001,
    /// The resource is busy and cannot be modified right now
    #[serde(rename = "RESOURCE_LOCKED")]
    ResourceLocked = 4002,

    // External Services (5000-5999)
    /// The provider answered with an error status or an unreadable body
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// The provider could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    /// The provider rejected our credentials
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,
    /// The provider throttled the request
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 5003,

    // Generation (5500-5599)
    /// The text model returned no text
    #[serde(rename = "PLAN_GENERATION_EMPTY")]
    PlanGenerationEmpty = 5500,
    /// The text model returned text that is not a valid plan
    #[serde(rename = "PLAN_FORMAT_INVALID")]
    PlanFormatInvalid = 5501,
    /// The image model returned no usable image
    #[serde(rename = "IMAGE_GENERATION_FAILED")]
    ImageGenerationFailed = 5510,

    // Configuration (6000-6999)
    /// A required configuration value is missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    /// A configuration value could not be parsed
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::InvalidInput | Self::ValueOutOfRange => 400,

            // 404 Not Found
            Self::ResourceNotFound => 404,

            // 409 Conflict
            Self::ResourceAlreadyExists | Self::ResourceLocked => 409,

            // 502 Bad Gateway
            Self::ExternalServiceError
            | Self::ExternalServiceUnavailable
            | Self::PlanGenerationEmpty
            | Self::PlanFormatInvalid
            | Self::ImageGenerationFailed => 502,

            // 503 Service Unavailable
            Self::ExternalAuthFailed | Self::ExternalRateLimited => 503,

            // 500 Internal Server Error
            Self::InternalError | Self::ConfigMissing | Self::ConfigInvalid => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceAlreadyExists => "A resource with this identifier already exists",
            Self::ResourceLocked => "The resource is currently busy",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with external service failed",
            Self::ExternalRateLimited => "External service rate limit exceeded",
            Self::PlanGenerationEmpty => "The plan generator returned no output",
            Self::PlanFormatInvalid => "The plan generator returned an invalid plan",
            Self::ImageGenerationFailed => "The infographic could not be generated",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal server error occurred",
        }
    }

    /// Whether this code belongs to the plan (text) generation category
    #[must_use]
    pub const fn is_plan_generation(&self) -> bool {
        matches!(self, Self::PlanGenerationEmpty | Self::PlanFormatInvalid)
    }

    /// Whether this code describes a transport or provider failure
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(
            self,
            Self::ExternalServiceError
                | Self::ExternalServiceUnavailable
                | Self::ExternalAuthFailed
                | Self::ExternalRateLimited
        )
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Structured diagnostic details (for example the offending raw response)
    pub details: serde_json::Value,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: serde_json::Value::Null,
        }
    }

    /// Attach structured details to the error
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Value outside the accepted range
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Resource already exists
    #[must_use]
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceAlreadyExists, message)
    }

    /// Resource busy
    #[must_use]
    pub fn locked(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceLocked, message)
    }

    /// Missing configuration value
    #[must_use]
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Unparseable configuration value
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service could not be reached
    #[must_use]
    pub fn external_unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// The text model returned no output
    #[must_use]
    pub fn plan_empty() -> Self {
        Self::new(ErrorCode::PlanGenerationEmpty, "Failed to generate plan text")
    }

    /// The text model returned output that is not a valid plan
    ///
    /// The offending text is kept in `details.raw_response` for diagnosis.
    #[must_use]
    pub fn plan_format(reason: impl Into<String>, raw_response: &str) -> Self {
        let reason = reason.into();
        Self::new(
            ErrorCode::PlanFormatInvalid,
            format!("Invalid response format from AI: {reason}"),
        )
        .with_details(serde_json::json!({
            "reason": reason,
            "raw_response": raw_response,
        }))
    }

    /// The image model returned no usable image
    #[must_use]
    pub fn image_generation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ImageGenerationFailed, message)
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// The raw model output attached to a plan format error, if any
    #[must_use]
    pub fn raw_response(&self) -> Option<&str> {
        self.details.get("raw_response").and_then(|v| v.as_str())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Body of an HTTP error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Structured details, omitted when empty
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                details: error.details,
            },
        }
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
        // Raw model output stays in the logs, not in client responses
        let mut body = ErrorResponse::from(self);
        if body.error.code == ErrorCode::PlanFormatInvalid {
            body.error.details = serde_json::Value::Null;
        }
        (status, axum::Json(body)).into_response()
    }
}
