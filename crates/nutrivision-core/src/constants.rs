// ABOUTME: Application constants for profile validation, model selection, and image encoding
// ABOUTME: Pure data constants organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Profile validation bounds, matching the capture form constraints
pub mod limits {
    /// Minimum accepted age in years
    pub const MIN_AGE: u32 = 1;
    /// Maximum accepted age in years
    pub const MAX_AGE: u32 = 120;
    /// Minimum accepted body weight in kilograms
    pub const MIN_WEIGHT_KG: f64 = 20.0;
    /// Minimum accepted height in centimeters
    pub const MIN_HEIGHT_CM: f64 = 50.0;
}

/// Defaults pre-filled in a fresh profile draft
pub mod profile_defaults {
    /// Default age in years
    pub const AGE: u32 = 30;
    /// Default weight in kilograms
    pub const WEIGHT_KG: f64 = 75.0;
    /// Default height in centimeters
    pub const HEIGHT_CM: f64 = 175.0;
}

/// Generative model identifiers
pub mod models {
    /// Text model used for structured plan generation
    pub const DEFAULT_PLAN_MODEL: &str = "gemini-3-flash-preview";
    /// Image model used for infographic generation
    pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
    /// Aspect ratio requested for the infographic
    pub const INFOGRAPHIC_ASPECT_RATIO: &str = "1:1";
}

/// MIME types and encoding prefixes
pub mod mime {
    /// Structured output MIME type for plan generation
    pub const APPLICATION_JSON: &str = "application/json";
    /// Infographic image MIME type
    pub const IMAGE_PNG: &str = "image/png";
    /// File name offered when the infographic is downloaded
    pub const INFOGRAPHIC_FILE_NAME: &str = "nutrivision-plan.png";
}

/// User-facing messages
pub mod messages {
    /// Fallback shown when a failure carries no message of its own
    pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again.";
    /// Progress message while the plan text is generated
    pub const STAGE_PLAN: &str = "Calculating nutritional requirements...";
    /// Progress message while the infographic is generated
    pub const STAGE_IMAGE: &str = "Generating a visual infographic...";
}
